//! Radix newtype and digit mapping

use std::fmt;
use std::str::FromStr;

use super::DecodeError;

/// Smallest supported radix.
pub const MIN_BASE: u32 = 2;
/// Largest supported radix (`0-9` plus `a-z`).
pub const MAX_BASE: u32 = 36;

/// Validated radix in `[2, 36]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Base(u32);

impl Base {
    /// Validate a raw radix.
    pub fn new(radix: u32) -> Result<Self, DecodeError> {
        if (MIN_BASE..=MAX_BASE).contains(&radix) {
            Ok(Self(radix))
        } else {
            Err(DecodeError::UnsupportedBase(radix))
        }
    }

    /// Raw radix value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl FromStr for Base {
    type Err = DecodeError;

    /// Parse the decimal radix field of a record (`"16"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let radix: u32 = s
            .trim()
            .parse()
            .map_err(|_| DecodeError::MalformedBase(s.to_string()))?;
        Self::new(radix)
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Map a digit character to its value, case-insensitively.
///
/// `'0'..='9'` map to 0..9, letters map to 10..35. Anything else is `None`.
pub fn digit_value(ch: char) -> Option<u32> {
    match ch {
        '0'..='9' => Some(ch as u32 - '0' as u32),
        'a'..='z' => Some(ch as u32 - 'a' as u32 + 10),
        'A'..='Z' => Some(ch as u32 - 'A' as u32 + 10),
        _ => None,
    }
}
