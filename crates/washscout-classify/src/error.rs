use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use washscout_core::RetryableError;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("classifier returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered, but not with a usable classification.
    #[error("malformed classifier response: {0}")]
    MalformedResponse(String),

    #[error("no images to classify")]
    NoImages,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RetryableError for ClassifyError {
    fn is_retryable(&self) -> bool {
        match self {
            ClassifyError::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status()
                        .is_some_and(|s| s.is_server_error() || s.as_u16() == 429)
            }
            ClassifyError::Timeout(_) => true,
            ClassifyError::Status { status, .. } => *status == 429 || *status >= 500,
            ClassifyError::MalformedResponse(_)
            | ClassifyError::NoImages
            | ClassifyError::InvalidBaseUrl { .. }
            | ClassifyError::Io { .. } => false,
        }
    }

    fn timed_out(after: Duration) -> Self {
        ClassifyError::Timeout(after)
    }
}

/// Reads the body of a response, turning non-2xx statuses into
/// [`ClassifyError::Status`].
pub(crate) async fn checked_text(response: reqwest::Response) -> Result<String, ClassifyError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        Ok(text)
    } else {
        Err(ClassifyError::Status {
            status: status.as_u16(),
            body: text,
        })
    }
}

pub(crate) fn parse_base(base: &str) -> Result<reqwest::Url, ClassifyError> {
    let normalised = format!("{}/", base.trim_end_matches('/'));
    reqwest::Url::parse(&normalised).map_err(|e| ClassifyError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn join(base: &reqwest::Url, path: &str) -> Result<reqwest::Url, ClassifyError> {
    base.join(path).map_err(|e| ClassifyError::InvalidBaseUrl {
        url: format!("{base}{path}"),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttling_and_server_errors_are_retryable() {
        for status in [429, 500, 502] {
            let err = ClassifyError::Status {
                status,
                body: String::new(),
            };
            assert!(err.is_retryable());
        }
    }

    #[test]
    fn bad_output_is_final() {
        assert!(!ClassifyError::MalformedResponse("not json".to_string()).is_retryable());
        assert!(!ClassifyError::Status {
            status: 400,
            body: String::new()
        }
        .is_retryable());
    }

    #[test]
    fn base_url_gets_single_trailing_slash() {
        let url = parse_base("https://example.openai.azure.com//").unwrap();
        assert_eq!(url.as_str(), "https://example.openai.azure.com/");
    }
}
