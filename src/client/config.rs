//! Request client configuration

use std::time::Duration;

use serde::Deserialize;

use crate::error::{GatewayError, Result};

/// Default per-attempt timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default number of retries after the first attempt
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default pause between attempts
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Upper bound accepted for `retry_attempts`
pub const MAX_RETRY_ATTEMPTS: u32 = 10;

/// Connection settings for one Evolution API server
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Absolute base URL, e.g. `https://evo.example.com`
    pub base_url: String,
    /// Value sent in the `apikey` header
    pub api_key: String,
    pub timeout_ms: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    /// Emit request/response events
    pub logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            logging: false,
        }
    }
}

impl ClientConfig {
    /// Create a config with default timing for the given server and key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_retry(mut self, attempts: u32, delay_ms: u64) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay_ms = delay_ms;
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::Config("api_key is empty".to_string()));
        }
        self.validate_connection()
    }

    /// Check everything except the API key
    pub fn validate_connection(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| GatewayError::Config(format!("base_url '{}' is not absolute: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GatewayError::Config(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_ms == 0 {
            return Err(GatewayError::Config("timeout_ms must be positive".to_string()));
        }
        if self.retry_delay_ms == 0 {
            return Err(GatewayError::Config("retry_delay_ms must be positive".to_string()));
        }
        if self.retry_attempts > MAX_RETRY_ATTEMPTS {
            return Err(GatewayError::Config(format!(
                "retry_attempts must be between 0 and {}, got {}",
                MAX_RETRY_ATTEMPTS, self.retry_attempts
            )));
        }
        Ok(())
    }
}

// Keep the key out of logs
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("logging", &self.logging)
            .finish()
    }
}
