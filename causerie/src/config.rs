//! Client configuration.

use std::time::Duration;

use anyhow::{bail, Result};

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Settings for reaching the chat backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backend, without trailing slash.
    pub base_url: String,
    /// Per-request timeout. `None` leaves it to the transport defaults.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reject base URLs reqwest could never reach.
    pub fn validate(&self) -> Result<()> {
        let Ok(url) = reqwest::Url::parse(&self.base_url) else {
            bail!("Invalid API URL: {}", self.base_url);
        };
        if !matches!(url.scheme(), "http" | "https") {
            bail!("API URL must use http or https: {}", self.base_url);
        }
        if self.timeout == Some(Duration::ZERO) {
            bail!("Timeout must be greater than zero");
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
