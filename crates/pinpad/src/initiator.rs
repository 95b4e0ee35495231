//! Session initiator used by the terminal front-end
//!
//! Stands in for the SDK's remote session entry point: it records the
//! request in the log and reports success.

use async_trait::async_trait;
use pinpad_core::{Result, SessionInitiator};
use url::Url;

pub struct LogInitiator;

#[async_trait]
impl SessionInitiator for LogInitiator {
    async fn start_session(&self, url: &Url, code: &str) -> Result<()> {
        tracing::info!(
            "Remote session requested: url={} host={} pin_len={}",
            url,
            url.host_str().unwrap_or("-"),
            code.len()
        );
        Ok(())
    }
}
