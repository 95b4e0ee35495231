//! Single decimal keypad digit

use crate::error::{CoreError, Result};
use std::fmt;

/// One decimal digit `0..=9`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digit(u8);

impl Digit {
    /// Every digit, indexed by value
    pub const ALL: [Digit; 10] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    /// Create digit from its numeric value
    ///
    /// Returns `None` for values above 9.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    /// Parse digit from a character (`'0'..='9'`)
    pub fn from_char(c: char) -> Result<Self> {
        c.to_digit(10)
            .map(|v| Self(v as u8))
            .ok_or(CoreError::InvalidDigit(c))
    }

    /// Numeric value
    pub fn value(self) -> u8 {
        self.0
    }

    /// ASCII character for this digit
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<u8> for Digit {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value).ok_or(CoreError::InvalidDigit(char::from(value.saturating_add(b'0'))))
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
