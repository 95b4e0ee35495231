//! Pairing code accumulated from keypad input

use crate::types::Digit;
use crate::PIN_LENGTH;
use std::fmt;

/// Digits entered so far, never longer than [`PIN_LENGTH`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingCode {
    digits: Vec<Digit>,
}

impl PairingCode {
    /// Create empty code
    pub fn new() -> Self {
        Self {
            digits: Vec::with_capacity(PIN_LENGTH),
        }
    }

    /// Append a digit
    ///
    /// Returns `false` (and leaves the code untouched) when already full.
    pub fn push(&mut self, digit: Digit) -> bool {
        if self.is_complete() {
            return false;
        }
        self.digits.push(digit);
        true
    }

    /// Remove the last digit, returns `None` when empty
    pub fn pop(&mut self) -> Option<Digit> {
        self.digits.pop()
    }

    /// Remove every digit
    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// True when all [`PIN_LENGTH`] digits are present
    pub fn is_complete(&self) -> bool {
        self.digits.len() == PIN_LENGTH
    }

    /// Character-for-character comparison with a stored secret
    pub fn matches(&self, secret: &str) -> bool {
        secret.chars().eq(self.digits.iter().map(|d| d.as_char()))
    }

    pub fn as_string(&self) -> String {
        self.digits.iter().map(|d| d.as_char()).collect()
    }
}

impl fmt::Display for PairingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> PairingCode {
        let mut code = PairingCode::new();
        for c in s.chars() {
            code.push(Digit::from_char(c).unwrap());
        }
        code
    }

    #[test]
    fn test_push_caps_at_pin_length() {
        let mut c = code("1234");
        assert!(c.is_complete());
        assert!(!c.push(Digit::new(5).unwrap()));
        assert_eq!(c.as_string(), "1234");
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let mut c = PairingCode::new();
        assert_eq!(c.pop(), None);
        assert!(c.is_empty());
    }

    #[test]
    fn test_matches_is_exact() {
        let c = code("1234");
        assert!(c.matches("1234"));
        assert!(!c.matches("123"));
        assert!(!c.matches("12345"));
        assert!(!c.matches(""));
        assert!(!c.matches("4321"));
    }

    #[test]
    fn test_clear() {
        let mut c = code("98");
        c.clear();
        assert_eq!(c.len(), 0);
        assert_eq!(c.to_string(), "");
    }
}
