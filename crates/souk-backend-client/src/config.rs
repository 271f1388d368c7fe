//! Backend API client configuration.
//!
//! Configures the base URL and credentials for the marketplace backend.
//! Override via environment variables or explicit construction for
//! staging/testing.

use url::Url;

/// Configuration for connecting to the marketplace backend.
///
/// Custom `Debug` implementation redacts the `api_token` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct BackendApiConfig {
    /// Base URL of the marketplace backend.
    pub base_url: Url,
    /// Bearer token for API authentication, if the deployment requires one.
    pub api_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for BackendApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendApiConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl BackendApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `BACKEND_API_URL` (required)
    /// - `BACKEND_API_TOKEN` (optional)
    /// - `BACKEND_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("BACKEND_API_URL").map_err(|_| ConfigError::MissingBaseUrl)?;
        let base_url = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidUrl("BACKEND_API_URL".to_string(), e.to_string()))?;
        Ok(Self {
            base_url,
            api_token: std::env::var("BACKEND_API_TOKEN").ok(),
            timeout_secs: std::env::var("BACKEND_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing at an explicit base URL (for tests
    /// against a local mock server).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL cannot be parsed.
    pub fn for_base_url(url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(url)
            .map_err(|e| ConfigError::InvalidUrl("base_url".to_string(), e.to_string()))?;
        Ok(Self {
            base_url,
            api_token: None,
            timeout_secs: 5,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `BACKEND_API_URL` was not set.
    #[error("BACKEND_API_URL environment variable is required")]
    MissingBaseUrl,
    /// A URL value could not be parsed.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    /// The bearer token contained characters not representable in a header.
    #[error("BACKEND_API_TOKEN is not a valid header value")]
    InvalidToken,
}
