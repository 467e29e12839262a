use crate::core::coord::Coord;
use crate::core::key::{Key, KEY_COUNT};

/// Pixel position of a key centre on the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Placement of the ten keys on a phone-style grid:
///
/// ```text
/// 1 2 3
/// 4 5 6
/// 7 8 9
///   0
/// ```
///
/// Grid cells are mapped to canvas pixels by `origin + spacing * cell`.
#[derive(Debug, Clone)]
pub struct KeypadLayout {
    cells: [Coord; KEY_COUNT],
    origin: Point,
    spacing: i32,
}

impl KeypadLayout {
    pub const DEFAULT_ORIGIN: Point = Point { x: 200, y: 100 };
    pub const DEFAULT_SPACING: i32 = 100;

    pub fn phone() -> Self {
        let mut cells = [Coord::ORIGIN; KEY_COUNT];
        for digit in 1..=9u8 {
            let i = (digit - 1) as i32;
            cells[digit as usize] = Coord::new(i % 3, i / 3);
        }
        cells[0] = Coord::new(1, 3);
        Self {
            cells,
            origin: Self::DEFAULT_ORIGIN,
            spacing: Self::DEFAULT_SPACING,
        }
    }

    #[inline]
    pub fn cell(&self, key: Key) -> Coord {
        self.cells[key.index()]
    }

    pub fn key_at(&self, cell: Coord) -> Option<Key> {
        Key::ALL.into_iter().find(|k| self.cells[k.index()] == cell)
    }

    pub fn canvas_point(&self, key: Key) -> Point {
        let c = self.cell(key);
        Point {
            x: self.origin.x + self.spacing * c.x,
            y: self.origin.y + self.spacing * c.y,
        }
    }
}

impl Default for KeypadLayout {
    fn default() -> Self {
        Self::phone()
    }
}
