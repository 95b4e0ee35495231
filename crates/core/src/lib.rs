//! Pinpad Core - pin entry and remote session pairing
//!
//! This crate provides:
//! - Domain types (digits, pairing code, keypad keys, render snapshot)
//! - The pin controller state machine
//! - Stored pin lookup and persistence
//! - Remote session initiation capability
//! - Error types

/// Digits in a pairing code
pub const PIN_LENGTH: usize = 4;

/// Default delay between the 4th digit and the match check
pub const DEFAULT_EVALUATION_DELAY_MS: u64 = 300;

/// Settings key holding the stored pin
pub const STORED_PIN_KEY: &str = "assurance_pin";

pub mod controller;
pub mod error;
pub mod secret;
pub mod session;
pub mod types;

// Re-export common types
pub use controller::{ControllerConfig, PinController};
pub use error::{CoreError, Result};
pub use secret::{PinStore, SecretProvider, StaticSecret};
pub use session::{RecordingInitiator, SessionInitiator, SessionLauncher};
pub use types::{Digit, KeypadKey, PairingCode, RenderState, SessionTarget};
