//! Upstream API configuration.
//!
//! Credentials are read from the environment exactly once, at process
//! start, into an explicit struct that is passed by reference into the
//! client. Nothing in the pipeline reads environment variables after that.

use std::env;
use std::time::Duration;

use crate::error::FetchError;

/// Default provider environment, the sandbox.
pub const DEFAULT_BASE_URL: &str = "https://sandbox.plaid.com";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upstream API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the provider environment.
    pub base_url: String,
    /// Client id injected into every request body.
    pub client_id: String,
    /// Secret injected into every request body.
    pub secret: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration for the default sandbox environment.
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: client_id.into(),
            secret: secret.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Builds a configuration from the environment.
    ///
    /// Reads `PLAID_CLIENT_ID` and `PLAID_SECRET` (required) and
    /// `PLAID_ENV` (optional base URL override).
    pub fn from_env() -> Result<Self, FetchError> {
        let client_id = env::var("PLAID_CLIENT_ID")
            .map_err(|_| FetchError::Config("PLAID_CLIENT_ID is not set".to_string()))?;
        let secret = env::var("PLAID_SECRET")
            .map_err(|_| FetchError::Config("PLAID_SECRET is not set".to_string()))?;

        let mut config = Self::new(client_id, secret);
        if let Ok(base_url) = env::var("PLAID_ENV") {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        Ok(config)
    }

    /// Overrides the base URL (tests point this at a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
