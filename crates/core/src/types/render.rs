//! Render contract between the pin controller and the view layer

use crate::PIN_LENGTH;

/// Message shown after a failed match
pub const INCORRECT_PIN_MESSAGE: &str = "Incorrect Pin";

/// Snapshot of everything a pin screen needs to draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderState {
    /// Number of filled indicator dots
    pub code_len: usize,
    /// Last 4-digit attempt did not match
    pub wrong_pin: bool,
    /// Screen switched to the connected view
    pub unlocked: bool,
    /// 4th digit entered, evaluation not fired yet
    pub evaluation_pending: bool,
}

impl RenderState {
    /// Filled state of each indicator dot, left to right
    pub fn indicators(&self) -> [bool; PIN_LENGTH] {
        let mut dots = [false; PIN_LENGTH];
        for (i, dot) in dots.iter_mut().enumerate() {
            *dot = self.code_len > i;
        }
        dots
    }

    /// Transient message under the indicator row
    pub fn message(&self) -> Option<&'static str> {
        self.wrong_pin.then_some(INCORRECT_PIN_MESSAGE)
    }
}
