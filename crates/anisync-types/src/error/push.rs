//! Undo and batch push errors.
//!
//! None of these leave partial state behind: a failed push keeps every
//! pending change queued, so retrying regenerates the same merged batch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while undoing or pushing pending changes.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum PushError {
    /// Undo requested with nothing pending (or nothing archived to revert)
    #[error("Nothing to undo")]
    EmptyUndo,

    /// The batch did not finish before its deadline
    #[error("Batch timed out after {timeout_ms}ms")]
    BatchTimeout {
        /// Whole-batch deadline in milliseconds
        timeout_ms: u64,
    },

    /// A request failed in transport or was rejected by the response validator
    #[error("Batch request failed: {message}")]
    BatchRequestFailed {
        /// Description of the first failure observed
        message: String,
    },
}

impl PushError {
    /// Build a request failure from anything displayable.
    pub fn request_failed(message: impl std::fmt::Display) -> Self {
        Self::BatchRequestFailed { message: message.to_string() }
    }
}
