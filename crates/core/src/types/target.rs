//! Remote session target URL

use crate::error::{CoreError, Result};
use std::fmt;
use url::Url;

/// URL of the remote debugging session, as typed or pasted by the user
///
/// Kept as the raw string: the pin flow never rejects a target up front.
/// Parsing happens only when a session is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTarget(String);

impl SessionTarget {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the target into a URL
    pub fn parse(&self) -> Result<Url> {
        Url::parse(self.0.trim())
            .map_err(|e| CoreError::InvalidSessionUrl(format!("{}: {}", self.0, e)))
    }
}

impl From<&str> for SessionTarget {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SessionTarget {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for SessionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
