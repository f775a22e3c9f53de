//! Transport-level errors of the task service client.

use thiserror::Error;

/// Errors that can occur when talking to the task service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error (connection refused, reset, invalid URL, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A by-id route answered 404.
    #[error("task {id} not found")]
    NotFound {
        /// Id that was addressed.
        id: i64,
    },

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code returned by the service.
        status: u16,
        /// The body's `error` field, or the raw body.
        message: String,
    },

    /// The response body was not what the contract promises.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
