use reqwest::StatusCode;
use thiserror::Error;

/// Failure to obtain a parsed routing payload from the upstream API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid routing API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("routing request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("routing API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse routing response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status reported by the upstream, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Request(err) => err.status(),
            _ => None,
        }
    }
}
