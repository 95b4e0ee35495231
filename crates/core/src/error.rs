//! Error types for pinpad-core
//!
//! A wrong PIN is not an error: it is reported through the controller's
//! error flag. These variants cover the ambient failures around it.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pin store parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid digit: {0:?}")]
    InvalidDigit(char),

    #[error("Invalid pin: expected {expected} decimal digits, got {got:?}")]
    InvalidPin { expected: usize, got: String },

    #[error("Unknown keypad key: {0}")]
    UnknownKey(String),

    #[error("Invalid session URL: {0}")]
    InvalidSessionUrl(String),

    #[error("Session initiation failed: {0}")]
    Session(String),

    #[error("No data directory found")]
    NoDataDir,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CoreError>;
