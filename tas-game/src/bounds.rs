//! Bounded lookup helpers: clamping and single-digit hex codes.

use thiserror::Error;

/// Clamp `value` into `[min, max]`.
#[must_use]
pub const fn bound_to(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Inclusive range a coded world attribute is held to after every roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeBounds {
    pub min: i32,
    pub max: i32,
}

impl AttributeBounds {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn clamp(self, value: i32) -> i32 {
        bound_to(value, self.min, self.max)
    }

    #[must_use]
    pub const fn contains(self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("value {0} cannot be written as a single hex digit")]
    OutOfRange(i32),
    #[error("'{0}' is not an uppercase hex digit")]
    NotHex(char),
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Render 0..=15 as `0-9A-F`.
///
/// # Errors
///
/// Returns [`HexError::OutOfRange`] for values outside 0..=15.
pub fn int_as_hex(value: i32) -> Result<char, HexError> {
    usize::try_from(value)
        .ok()
        .and_then(|idx| HEX_DIGITS.get(idx))
        .map(|&byte| char::from(byte))
        .ok_or(HexError::OutOfRange(value))
}

/// Parse a single uppercase hex digit.
///
/// # Errors
///
/// Returns [`HexError::NotHex`] for anything outside `0-9A-F`.
pub fn hex_as_int(digit: char) -> Result<i32, HexError> {
    HEX_DIGITS
        .iter()
        .position(|&byte| char::from(byte) == digit)
        .and_then(|idx| i32::try_from(idx).ok())
        .ok_or(HexError::NotHex(digit))
}
