//! Runtime configuration
//!
//! Read from environment variables, with defaults for local development.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::models::Period;

/// Base URL of the nutrition service
pub const ENV_API_URL: &str = "NUTRISTATS_API_URL";
/// Optional bearer token sent with every request
pub const ENV_API_TOKEN: &str = "NUTRISTATS_API_TOKEN";
/// Per-request timeout in seconds
pub const ENV_HTTP_TIMEOUT_SECS: &str = "NUTRISTATS_HTTP_TIMEOUT_SECS";
/// Period selected on startup
pub const ENV_DEFAULT_PERIOD: &str = "NUTRISTATS_DEFAULT_PERIOD";

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var}: {source}")]
    InvalidPeriod {
        var: &'static str,
        #[source]
        source: crate::models::ParsePeriodError,
    },
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub default_period: Period,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_period: Period::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Config::default();

        if let Some(url) = get(ENV_API_URL) {
            if Url::parse(&url).is_err() {
                return Err(ConfigError::InvalidUrl {
                    var: ENV_API_URL,
                    value: url,
                });
            }
            config.api_base_url = url;
        }

        config.api_token = get(ENV_API_TOKEN);

        if let Some(raw) = get(ENV_HTTP_TIMEOUT_SECS) {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    var: ENV_HTTP_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = get(ENV_DEFAULT_PERIOD) {
            config.default_period = raw.parse().map_err(|source| ConfigError::InvalidPeriod {
                var: ENV_DEFAULT_PERIOD,
                source,
            })?;
        }

        Ok(config)
    }
}
