//! The keypad itself: where the keys sit, and which keys a knight connects.

pub mod graph;
pub mod layout;
