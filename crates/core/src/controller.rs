//! Pin entry and pairing controller
//!
//! State machine behind the pin screen:
//!
//! ```text
//! Entering(0..3) --4th digit--> AwaitingEvaluation(4) --match----> Unlocked
//!       ^                                |
//!       +-----------mismatch (error)-----+
//! ```
//!
//! Evaluation after the 4th digit is deferred by
//! [`ControllerConfig::evaluation_delay`] so the last indicator dot is drawn
//! before the screen unlocks or flashes the error. A scheduled evaluation
//! is never cancelled; it runs against whatever code exists when it fires.
//!
//! `press_connect` is orthogonal to evaluation: with 4 digits present it
//! always starts a session, whether or not the code matches.

use crate::secret::SecretProvider;
use crate::session::{SessionInitiator, SessionLauncher};
use crate::types::{Digit, KeypadKey, PairingCode, RenderState, SessionTarget};
use crate::DEFAULT_EVALUATION_DELAY_MS;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

/// Controller configuration
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Delay between the 4th digit and the match check
    pub evaluation_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            evaluation_delay: Duration::from_millis(DEFAULT_EVALUATION_DELAY_MS),
        }
    }
}

impl ControllerConfig {
    /// Create config with a custom evaluation delay
    pub fn with_delay(evaluation_delay: Duration) -> Self {
        Self { evaluation_delay }
    }
}

#[derive(Debug, Default)]
struct PinState {
    code: PairingCode,
    wrong_pin: bool,
    unlocked: bool,
    /// Evaluations scheduled but not fired yet
    pending: usize,
}

impl PinState {
    fn render(&self) -> RenderState {
        RenderState {
            code_len: self.code.len(),
            wrong_pin: self.wrong_pin,
            unlocked: self.unlocked,
            evaluation_pending: self.pending > 0,
        }
    }
}

struct Inner {
    state: Mutex<PinState>,
    target: SessionTarget,
    secret: Arc<dyn SecretProvider>,
    launcher: SessionLauncher,
    config: ControllerConfig,
    render_tx: watch::Sender<RenderState>,
}

/// Handle to one pin screen's state
///
/// Cloning shares the same screen. Must be driven from inside a tokio
/// runtime: evaluations and session requests are spawned tasks.
#[derive(Clone)]
pub struct PinController {
    inner: Arc<Inner>,
}

impl PinController {
    /// Create controller with the default evaluation delay
    pub fn new(
        target: impl Into<SessionTarget>,
        secret: Arc<dyn SecretProvider>,
        initiator: Arc<dyn SessionInitiator>,
    ) -> Self {
        Self::with_config(target, secret, initiator, ControllerConfig::default())
    }

    pub fn with_config(
        target: impl Into<SessionTarget>,
        secret: Arc<dyn SecretProvider>,
        initiator: Arc<dyn SessionInitiator>,
        config: ControllerConfig,
    ) -> Self {
        let (render_tx, _) = watch::channel(RenderState::default());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(PinState::default()),
                target: target.into(),
                secret,
                launcher: SessionLauncher::new(initiator),
                config,
                render_tx,
            }),
        }
    }

    /// Session target this screen was opened with
    pub fn target(&self) -> &SessionTarget {
        &self.inner.target
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    /// Current render snapshot
    pub fn render_state(&self) -> RenderState {
        self.lock().render()
    }

    /// Feed of render snapshots, updated after every state change
    pub fn subscribe(&self) -> watch::Receiver<RenderState> {
        self.inner.render_tx.subscribe()
    }

    /// Dispatch a keypad key
    pub fn press(&self, key: KeypadKey) {
        match key {
            KeypadKey::Digit(d) => self.press_digit(d),
            KeypadKey::Delete => self.press_delete(),
            KeypadKey::Connect => self.press_connect(),
        }
    }

    /// Append a digit; the 4th digit schedules an evaluation
    pub fn press_digit(&self, digit: Digit) {
        let complete = {
            let mut state = self.lock();
            if state.unlocked {
                tracing::debug!("Screen unlocked, ignoring digit");
                return;
            }
            if !state.code.push(digit) {
                tracing::debug!("Code already complete, ignoring digit");
                return;
            }
            state.wrong_pin = false;
            let complete = state.code.is_complete();
            if complete {
                state.pending += 1;
            }
            self.publish(&state);
            complete
        };

        if complete {
            self.schedule_evaluation();
        }
    }

    /// Remove the last digit
    pub fn press_delete(&self) {
        let mut state = self.lock();
        if state.unlocked || state.code.pop().is_none() {
            return;
        }
        self.publish(&state);
    }

    /// Start a session with the current code, matching or not
    ///
    /// Does nothing unless all 4 digits are present.
    pub fn press_connect(&self) {
        let code = {
            let state = self.lock();
            if state.unlocked || !state.code.is_complete() {
                tracing::debug!("Connect ignored with {} digits", state.code.len());
                return;
            }
            state.code.clone()
        };

        self.inner.launcher.launch(&self.inner.target, &code);
    }

    /// Drop every entered digit and the error message
    pub fn clear(&self) {
        let mut state = self.lock();
        if state.unlocked {
            return;
        }
        state.code.clear();
        state.wrong_pin = false;
        self.publish(&state);
    }

    fn schedule_evaluation(&self) {
        let controller = self.clone();
        let delay = self.inner.config.evaluation_delay;
        tracing::debug!("Evaluation scheduled in {:?}", delay);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            controller.evaluate();
        });
    }

    fn evaluate(&self) {
        let matched = {
            let mut state = self.lock();
            state.pending = state.pending.saturating_sub(1);

            let matched = if state.unlocked || !state.code.is_complete() {
                None
            } else {
                state.wrong_pin = false;
                if state.code.matches(&self.inner.secret.stored_pin()) {
                    tracing::info!("Pin accepted, screen unlocked");
                    state.unlocked = true;
                    Some(state.code.clone())
                } else {
                    tracing::info!("Incorrect pin entered");
                    state.wrong_pin = true;
                    state.code.clear();
                    None
                }
            };
            self.publish(&state);
            matched
        };

        if let Some(code) = matched {
            self.inner.launcher.launch(&self.inner.target, &code);
        }
    }

    fn publish(&self, state: &PinState) {
        self.inner.render_tx.send_replace(state.render());
    }

    fn lock(&self) -> MutexGuard<'_, PinState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
