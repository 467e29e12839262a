//! Knight moves on a phone keypad: the move graph between keys, counts of
//! move sequences of a given length, and a small renderer for both.

pub mod config;
pub mod core;
pub mod count;
pub mod error;
pub mod keypad;
pub mod render;

pub use crate::core::key::Key;
pub use crate::count::{count_sequences, neighbors, total_sequences_from_all_starts};
pub use crate::error::{KeypadError, Result};
