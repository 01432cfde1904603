//! API-specific error types.

use thiserror::Error;

/// Errors returned by a Genji API request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The remote API could not be reached.
    #[error("Failed to reach Genji API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote API answered with a non-success status.
    #[error("Genji API error: {status} {status_text} - {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The response body is not valid JSON.
    #[error("Invalid JSON from Genji API: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Create a status error from a response status and its body text.
    pub fn status(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.into(),
        }
    }
}
