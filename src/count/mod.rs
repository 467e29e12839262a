//! Counting knight-move sequences on the keypad.
//!
//! [`MoveCounter`] works on validated [`Key`]s and unsigned step counts. The free
//! functions below accept raw integers, validate them, and run against the
//! standard graph with the default strategy.

pub mod counter;

pub use counter::{CountReport, MoveCounter, StartCount, Strategy};

use crate::core::key::Key;
use crate::error::{KeypadError, Result};
use crate::keypad::graph::MoveGraph;

fn moves_arg(name: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| KeypadError::InvalidArgument {
        name,
        value,
        reason: "must be non-negative",
    })
}

/// Neighbors of `position` in the standard graph.
pub fn neighbors(position: i64) -> Result<&'static [Key]> {
    MoveGraph::standard().neighbors_of(position)
}

/// Number of sequences of exactly `remaining_moves` knight moves starting at `start`.
pub fn count_sequences(start: i64, remaining_moves: i64) -> Result<u64> {
    let start = Key::new(start)?;
    let remaining = moves_arg("remaining_moves", remaining_moves)?;
    MoveCounter::new(MoveGraph::standard()).count_sequences(start, remaining)
}

/// Sum over every start key of `count_sequences(key, num_moves - 1)`.
pub fn total_sequences_from_all_starts(num_moves: i64) -> Result<u64> {
    let num_moves = moves_arg("num_moves", num_moves)?;
    MoveCounter::new(MoveGraph::standard()).total_sequences_from_all_starts(num_moves)
}
