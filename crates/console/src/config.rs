//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOCKPILOT_API_URL` - Backend base URL (default: `http://127.0.0.1:8000/api`)
//! - `STOCKPILOT_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `STOCKPILOT_FOLLOW_UP_DELAY_MS` - Pause between a successful stock
//!   transfer and the follow-up order creation, tolerating the backend's
//!   eventually-consistent stock view (default: 750)

use std::time::Duration;

use thiserror::Error;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_FOLLOW_UP_DELAY_MS: u64 = 750;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Console application configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Backoff between transfer success and follow-up order creation.
    pub follow_up_delay: Duration,
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = normalize_base_url(&get_env_or_default(
            "STOCKPILOT_API_URL",
            DEFAULT_API_URL,
        ));
        let timeout_secs = parse_env_u64("STOCKPILOT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let follow_up_ms =
            parse_env_u64("STOCKPILOT_FOLLOW_UP_DELAY_MS", DEFAULT_FOLLOW_UP_DELAY_MS)?;

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            follow_up_delay: Duration::from_millis(follow_up_ms),
        })
    }

    /// A config pointing at the given base URL, defaults elsewhere.
    ///
    /// Used by tests and by callers that already know their endpoint.
    #[must_use]
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_base_url(&api_url.into()),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            follow_up_delay: Duration::from_millis(DEFAULT_FOLLOW_UP_DELAY_MS),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a numeric environment variable, falling back to a default when unset.
fn parse_env_u64(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Strip trailing slashes so path joining stays predictable.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
