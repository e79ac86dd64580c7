use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use washscout_core::RetryableError;

/// Errors returned by the maps client and the asset cache.
#[derive(Debug, Error)]
pub enum MapsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A single attempt exceeded its deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-2xx response; the body is kept for the log.
    #[error("Google API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The query cannot be sent as-is (radius out of range, bad coordinates).
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("asset I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RetryableError for MapsError {
    /// Retriable: connect failures, timeouts, HTTP 429 and 5xx.
    fn is_retryable(&self) -> bool {
        match self {
            MapsError::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status()
                        .is_some_and(|s| s.is_server_error() || s.as_u16() == 429)
            }
            MapsError::Timeout(_) => true,
            MapsError::Status { status, .. } => *status == 429 || *status >= 500,
            MapsError::Deserialize { .. }
            | MapsError::InvalidQuery(_)
            | MapsError::InvalidBaseUrl { .. }
            | MapsError::Io { .. } => false,
        }
    }

    fn timed_out(after: Duration) -> Self {
        MapsError::Timeout(after)
    }
}
