// ABOUTME: Errors from talking to the GitHub REST API.
// ABOUTME: Transport, HTTP status, and decoding failures; none are retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("GitHub API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// The body could not be decoded into the expected shape.
    #[error("failed to decode GitHub response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("invalid GitHub API configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Authentication or authorization was rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
