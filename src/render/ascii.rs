use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use crate::error::Result;
use crate::keypad::layout::Point;
use crate::render::scene::Scene;
use crate::render::Surface;

/// Canvas pixels per terminal cell. Terminal cells are roughly twice as tall as wide.
pub const CELL_W: i32 = 10;
pub const CELL_H: i32 = 20;

struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl Grid {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    fn put(&mut self, col: i32, row: i32, ch: char) {
        if col < 0 || row < 0 {
            return;
        }
        let (c, r) = (col as usize, row as usize);
        if c < self.cols && r < self.rows {
            self.cells[r * self.cols + c] = ch;
        }
    }

    fn put_str(&mut self, col: i32, row: i32, s: &str) {
        for (i, ch) in s.chars().enumerate() {
            self.put(col + i as i32, row, ch);
        }
    }

    fn into_string(self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rows);
        for row in self.cells.chunks(self.cols.max(1)) {
            let line: String = row.iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn to_cell(p: Point) -> (i32, i32) {
    (p.x / CELL_W, p.y / CELL_H)
}

fn stroke_char(dx: i32, dy: i32) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay == 0 || ax >= 3 * ay {
        '-'
    } else if ax == 0 || ay >= 3 * ax {
        '|'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}

/// Bresenham between two cells, endpoints excluded.
fn draw_line(grid: &mut Grid, from: (i32, i32), to: (i32, i32)) {
    let ch = stroke_char(to.0 - from.0, to.1 - from.1);
    let dx = (to.0 - from.0).abs();
    let dy = -(to.1 - from.1).abs();
    let sx = if from.0 < to.0 { 1 } else { -1 };
    let sy = if from.1 < to.1 { 1 } else { -1 };
    let (mut x, mut y) = from;
    let mut err = dx + dy;
    loop {
        if (x, y) == to {
            break;
        }
        if (x, y) != from {
            grid.put(x, y, ch);
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Rasterize a scene into terminal text. Edges are drawn under the keys so
/// labels stay readable.
pub fn to_ascii(scene: &Scene) -> String {
    let cols = (scene.width as i32 / CELL_W).max(1) as usize;
    let rows = (scene.height as i32 / CELL_H).max(1) as usize;
    let mut grid = Grid::new(cols, rows);

    for line in &scene.edges {
        draw_line(&mut grid, to_cell(line.from), to_cell(line.to));
    }
    for key in &scene.keys {
        let (c, r) = to_cell(key.center);
        grid.put_str(c - 1, r, &format!("({})", key.label));
    }
    let (c, r) = to_cell(scene.caption.at);
    grid.put_str(c, r, &scene.caption.content);

    grid.into_string()
}

/// Draws frames as text.
///
/// With `clear` set, the screen is cleared and every row is placed with a cursor
/// move, so frames overwrite each other and render correctly in raw mode.
pub struct AsciiSurface<W: Write> {
    out: W,
    clear: bool,
}

impl<W: Write> AsciiSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, clear: false }
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for AsciiSurface<W> {
    fn present(&mut self, scene: &Scene, _frame: u64) -> Result<()> {
        let frame = to_ascii(scene);
        if self.clear {
            queue!(self.out, Clear(ClearType::All))?;
            for (row, line) in frame.lines().enumerate() {
                let row = u16::try_from(row).unwrap_or(u16::MAX);
                queue!(self.out, MoveTo(0, row), Print(line))?;
            }
        } else {
            self.out.write_all(frame.as_bytes())?;
        }
        self.out.flush()?;
        Ok(())
    }
}
