//! Error types for the anisync HTTP client.

use anisync_types::RecordError;
use thiserror::Error;

/// Errors that can occur while talking to a remote list service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an invalid or unparseable response.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Server returned 429 Too Many Requests.
    #[error("Rate limited (429): retry after {retry_after:?}s")]
    RateLimited {
        /// Seconds to wait before retrying, if provided by server.
        retry_after: Option<u64>,
    },

    /// Server returned a non-success status.
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Gave up after the maximum number of attempts.
    #[error("Timeout after {0} attempts")]
    Timeout(u32),

    /// Records could not be addressed on the requested service.
    #[error("Record error: {0}")]
    Record(#[from] RecordError),
}
