//! Drawing the keypad and its knight graph.
//!
//! A [`scene::Scene`] is a flat list of shapes built once from the layout, the
//! graph and a count report. Surfaces turn a scene into output: ASCII frames for
//! a terminal ([`ascii`]) or an SVG document ([`svg`]). [`frame_loop`] redraws a
//! scene at a fixed rate until closed; [`terminal`] supplies the interactive
//! session and its close keys.

pub mod ascii;
pub mod frame_loop;
pub mod scene;
pub mod svg;
pub mod terminal;

use crate::error::Result;
use crate::render::scene::Scene;

/// Something a scene can be presented on, once per frame.
pub trait Surface {
    fn present(&mut self, scene: &Scene, frame: u64) -> Result<()>;
}
