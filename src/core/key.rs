use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KeypadError, Result};

/// Number of keys on the keypad.
pub const KEY_COUNT: usize = 10;

/// One keypad key, `0..=9`.
///
/// The only way to obtain a `Key` from outside the crate is through a
/// validating constructor, so every `Key` indexes a defined graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Key(u8);

impl Key {
    /// All keys in numeric order.
    pub const ALL: [Key; KEY_COUNT] = [
        Key(0),
        Key(1),
        Key(2),
        Key(3),
        Key(4),
        Key(5),
        Key(6),
        Key(7),
        Key(8),
        Key(9),
    ];

    pub fn new(position: i64) -> Result<Key> {
        if (0..KEY_COUNT as i64).contains(&position) {
            Ok(Key(position as u8))
        } else {
            Err(KeypadError::InvalidPosition { position })
        }
    }

    /// Caller guarantees `digit < 10`.
    pub(crate) const fn from_digit(digit: u8) -> Key {
        debug_assert!((digit as usize) < KEY_COUNT);
        Key(digit)
    }

    #[inline]
    pub fn digit(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i64> for Key {
    type Error = KeypadError;

    fn try_from(position: i64) -> Result<Key> {
        Key::new(position)
    }
}

impl From<Key> for u8 {
    fn from(key: Key) -> u8 {
        key.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
