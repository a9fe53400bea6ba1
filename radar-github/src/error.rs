//! Error types for GitHub operations

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::http::HttpError;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// Client could not be constructed, e.g. no token
    #[error("GitHub configuration error: {0}")]
    Config(String),

    /// Request refused locally because the quota is exhausted
    #[error(
        "GitHub rate limit exceeded, resets at {reset_at} (retry in {}s)",
        .wait.as_secs()
    )]
    RateLimited {
        /// Time left until the quota resets
        wait: Duration,
        /// When the quota resets
        reset_at: DateTime<Utc>,
    },

    /// Non-success HTTP status from the API
    #[error("GitHub API error ({status}): {message}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Message from the error body, or the status line
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        /// Requested URL
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Request never produced a response
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Check whether this error came from the local rate limit gate
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited { .. })
    }
}

impl From<radar_core::Error> for Error {
    fn from(err: radar_core::Error) -> Self {
        Error::Config(err.to_string())
    }
}
