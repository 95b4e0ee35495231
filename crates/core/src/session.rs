//! Remote session initiation
//!
//! The session itself belongs to the SDK on the other side of
//! [`SessionInitiator`]. The pin flow only fires the request: it never
//! awaits the outcome and never feeds it back into screen state.

use crate::error::{CoreError, Result};
use crate::types::{PairingCode, SessionTarget};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use url::Url;

/// Capability that opens a remote debugging session
#[async_trait]
pub trait SessionInitiator: Send + Sync {
    /// Start a session against `url`, authenticated by `code`
    async fn start_session(&self, url: &Url, code: &str) -> Result<()>;
}

/// Fire-and-forget adapter in front of a [`SessionInitiator`]
///
/// Must be used from inside a tokio runtime.
#[derive(Clone)]
pub struct SessionLauncher {
    initiator: Arc<dyn SessionInitiator>,
}

impl SessionLauncher {
    pub fn new(initiator: Arc<dyn SessionInitiator>) -> Self {
        Self { initiator }
    }

    /// Dispatch a session request without waiting for it
    ///
    /// An unparseable target is dropped silently (debug log only).
    /// Returns `true` when a request was dispatched.
    pub fn launch(&self, target: &SessionTarget, code: &PairingCode) -> bool {
        let url = match target.parse() {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping session start: {}", e);
                return false;
            }
        };

        let code = code.as_string();
        let initiator = self.initiator.clone();
        tracing::info!("Starting remote session at {}", url);

        tokio::spawn(async move {
            if let Err(e) = initiator.start_session(&url, &code).await {
                tracing::warn!("Remote session start failed: {}", e);
            }
        });
        true
    }
}

/// Initiator that records every request, for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct RecordingInitiator {
    calls: Arc<Mutex<Vec<(Url, String)>>>,
    fail: bool,
}

impl RecordingInitiator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record requests but report every one as failed
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Requests received so far, as `(url, code)`
    pub fn calls(&self) -> Vec<(Url, String)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Codes received so far
    pub fn codes(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, code)| code).collect()
    }
}

#[async_trait]
impl SessionInitiator for RecordingInitiator {
    async fn start_session(&self, url: &Url, code: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((url.clone(), code.to_string()));
        if self.fail {
            return Err(CoreError::Session("rejected by recorder".to_string()));
        }
        Ok(())
    }
}
