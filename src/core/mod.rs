//! Low-level primitives shared by the graph, the counter and the renderer:
//!
//! - [`key`]: a validated keypad position (`0..=9`).
//! - [`coord`]: integer grid coordinates and the knight step set.

pub mod coord;
pub mod key;
