//! Domain types for pin entry

mod code;
mod digit;
mod key;
mod render;
mod target;

pub use code::PairingCode;
pub use digit::Digit;
pub use key::{KeypadKey, CONNECT_LABEL, DELETE_LABEL};
pub use render::{RenderState, INCORRECT_PIN_MESSAGE};
pub use target::SessionTarget;
