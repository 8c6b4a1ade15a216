//! Client error types

use thiserror::Error;

/// Errors raised while talking to a remote data source
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
