//! Arbitrary-base digit decoding
//!
//! Turns a digit string such as `"a1b2"` in a stated radix into an `i64`.
//! Positional semantics: the rightmost digit has place value base⁰.
//! Arithmetic is checked, so values past `i64::MAX` fail instead of wrapping.

mod base;

pub use base::{digit_value, Base, MAX_BASE, MIN_BASE};

use thiserror::Error;

/// Why a digit string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigitFault {
    /// No digits to decode.
    #[error("no digits to decode")]
    Empty,
    /// Character outside `0-9`, `a-z`, `A-Z`.
    #[error("character '{ch}' at position {position} is not a digit")]
    Unmappable {
        /// Offending character.
        ch: char,
        /// Character offset in the input.
        position: usize,
    },
    /// Digit value not below the radix.
    #[error("digit '{ch}' (value {value}) at position {position} is invalid for base {base}")]
    OutOfRange {
        /// Offending character.
        ch: char,
        /// Its mapped value.
        value: u32,
        /// Radix it was checked against.
        base: u32,
        /// Character offset in the input.
        position: usize,
    },
}

/// Errors raised while decoding a digit string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Radix outside `[2, 36]`.
    #[error("unsupported base {0} (expected 2..=36)")]
    UnsupportedBase(u32),

    /// Radix field was not a decimal integer.
    #[error("malformed base '{0}'")]
    MalformedBase(String),

    /// Digit string contained an unusable character or was empty.
    #[error("invalid digit: {0}")]
    InvalidDigit(DigitFault),

    /// Decoded value does not fit in a signed 64-bit integer.
    #[error("value '{digits}' in base {base} overflows a 64-bit integer")]
    Overflow {
        /// Input digit string.
        digits: String,
        /// Radix used.
        base: u32,
    },
}

/// Decode `digits` in radix `base`.
pub fn decode(digits: &str, base: u32) -> Result<i64, DecodeError> {
    decode_in(digits, Base::new(base)?)
}

/// Decode `digits` in an already validated radix.
pub fn decode_in(digits: &str, base: Base) -> Result<i64, DecodeError> {
    if digits.is_empty() {
        return Err(DecodeError::InvalidDigit(DigitFault::Empty));
    }

    let radix = i64::from(base.get());
    let overflow = || DecodeError::Overflow {
        digits: digits.to_string(),
        base: base.get(),
    };

    // Horner form: same place values as summing digit·base^k right to left.
    let mut value: i64 = 0;
    for (position, ch) in digits.chars().enumerate() {
        let digit = digit_value(ch)
            .ok_or(DecodeError::InvalidDigit(DigitFault::Unmappable { ch, position }))?;
        if digit >= base.get() {
            return Err(DecodeError::InvalidDigit(DigitFault::OutOfRange {
                ch,
                value: digit,
                base: base.get(),
                position,
            }));
        }
        value = value
            .checked_mul(radix)
            .and_then(|v| v.checked_add(i64::from(digit)))
            .ok_or_else(overflow)?;
    }

    Ok(value)
}
