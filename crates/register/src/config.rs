//! Register configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `POS_API_URL` - Base URL of the product/purchase API
//!   (default: the hosted POS backend)
//! - `POS_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Base URL used when `POS_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://tech0-gen8-step4-pos-app-10.azurewebsites.net/";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Register configuration.
#[derive(Debug, Clone)]
pub struct RegisterConfig {
    /// Base URL of the product/purchase API
    pub api_url: Url,
    /// Timeout applied to every API request
    pub http_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl RegisterConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = parse_api_url(
            "POS_API_URL",
            &get("POS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;
        let http_timeout = match get("POS_HTTP_TIMEOUT_SECS") {
            Some(raw) => parse_timeout("POS_HTTP_TIMEOUT_SECS", &raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            http_timeout,
            sentry_dsn: get("SENTRY_DSN").filter(|s| !s.is_empty()),
            sentry_environment: get("SENTRY_ENVIRONMENT").filter(|s| !s.is_empty()),
        })
    }

    /// Override the API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `url` is not an absolute http(s) URL.
    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url("--api-url", url)?;
        Ok(self)
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.http_timeout = Duration::from_secs(secs);
        self
    }

    /// Returns the full URL of an API endpoint.
    ///
    /// Trailing slashes on the base URL are dropped so that `path` is
    /// never joined with a double slash.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and validate an API base URL.
fn parse_api_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(source.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            source.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse a timeout given in whole seconds.
fn parse_timeout(source: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(source.to_string(), e.to_string()))?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            source.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
