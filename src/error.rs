use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by graph lookups, counting and configuration loading.
#[derive(Debug, Error)]
pub enum KeypadError {
    /// A position outside the ten keypad keys.
    #[error("invalid position {position}: keypad keys are 0..=9")]
    InvalidPosition { position: i64 },

    /// A negative step count, or a zero move count where at least one is required.
    #[error("invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },

    /// A sequence count that does not fit in `u64`.
    #[error("sequence count overflows u64 at {moves} move(s)")]
    Overflow { moves: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error in {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, KeypadError>;
