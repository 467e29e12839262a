use crate::config::CanvasConfig;
use crate::core::key::Key;
use crate::count::CountReport;
use crate::keypad::graph::MoveGraph;
use crate::keypad::layout::{KeypadLayout, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circle {
    pub center: Point,
    pub radius: i32,
    pub fill: Rgb,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub color: Rgb,
    pub width: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub at: Point,
    pub size: i32,
    pub color: Rgb,
    pub content: String,
}

/// Everything drawn in one frame. Shapes are painted in order:
/// background, keys, edges, caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    pub keys: Vec<Circle>,
    pub edges: Vec<Line>,
    pub caption: Text,
}

pub const KEY_RADIUS: i32 = 30;
pub const CAPTION_AT: Point = Point { x: 50, y: 500 };

pub fn caption_text(report: &CountReport) -> String {
    format!(
        "Valid sequences with {} move(s): {}",
        report.moves, report.total
    )
}

impl Scene {
    /// One circle per key, one line per directed edge. The report only feeds the caption.
    pub fn build(
        layout: &KeypadLayout,
        graph: &MoveGraph,
        report: &CountReport,
        canvas: CanvasConfig,
    ) -> Scene {
        let keys = Key::ALL
            .iter()
            .map(|&key| Circle {
                center: layout.canvas_point(key),
                radius: KEY_RADIUS,
                fill: Rgb::BLUE,
                label: key.to_string(),
            })
            .collect();

        let edges = graph
            .edges()
            .map(|(a, b)| Line {
                from: layout.canvas_point(a),
                to: layout.canvas_point(b),
                color: Rgb::GREEN,
                width: 2,
            })
            .collect();

        Scene {
            width: canvas.width,
            height: canvas.height,
            background: Rgb::WHITE,
            keys,
            edges,
            caption: Text {
                at: CAPTION_AT,
                size: 36,
                color: Rgb::BLACK,
                content: caption_text(report),
            },
        }
    }
}
