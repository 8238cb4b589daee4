//! Core configuration for the client.

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_REQUEST_TIMEOUT_SEC: u64 = 30;

/// Settings for the client core: where the Authentication Service lives and
/// where durable tokens go.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Base URL of the Authentication Service (e.g. "https://api.courtbook.app").
    pub api_base_url: String,
    /// Request timeout in seconds for all Authentication Service calls.
    pub request_timeout_sec: u64,
    /// Path of the durable token file. None keeps tokens in memory only.
    pub token_file: Option<PathBuf>,
}

impl CoreConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout_sec: DEFAULT_REQUEST_TIMEOUT_SEC,
            token_file: None,
        }
    }

    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = Some(path.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            bail!("api_base_url must not be empty");
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            bail!("api_base_url must be an http(s) URL: {}", self.api_base_url);
        }
        if self.request_timeout_sec == 0 {
            bail!("request_timeout_sec must be greater than zero");
        }
        Ok(())
    }
}
