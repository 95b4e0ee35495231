//! Keypad keys and grid layout

use crate::error::{CoreError, Result};
use crate::types::Digit;
use std::fmt;
use std::str::FromStr;

/// Label of the delete key
pub const DELETE_LABEL: &str = "delete.fill";

/// Label of the connect key
pub const CONNECT_LABEL: &str = "connect";

/// A key on the pin pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypadKey {
    Digit(Digit),
    Delete,
    Connect,
}

impl KeypadKey {
    /// Keys in grid order: `1..9` on three rows, then delete, `0`, connect
    pub fn layout() -> [[KeypadKey; 3]; 4] {
        let d = |v: usize| KeypadKey::Digit(Digit::ALL[v]);
        [
            [d(1), d(2), d(3)],
            [d(4), d(5), d(6)],
            [d(7), d(8), d(9)],
            [KeypadKey::Delete, d(0), KeypadKey::Connect],
        ]
    }

    /// Stable label used by the view layer
    pub fn label(&self) -> String {
        match self {
            KeypadKey::Digit(d) => d.to_string(),
            KeypadKey::Delete => DELETE_LABEL.to_string(),
            KeypadKey::Connect => CONNECT_LABEL.to_string(),
        }
    }
}

impl FromStr for KeypadKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            DELETE_LABEL => Ok(KeypadKey::Delete),
            CONNECT_LABEL => Ok(KeypadKey::Connect),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Digit::from_char(c)
                        .map(KeypadKey::Digit)
                        .map_err(|_| CoreError::UnknownKey(s.to_string())),
                    _ => Err(CoreError::UnknownKey(s.to_string())),
                }
            }
        }
    }
}

impl From<Digit> for KeypadKey {
    fn from(d: Digit) -> Self {
        KeypadKey::Digit(d)
    }
}

impl fmt::Display for KeypadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
