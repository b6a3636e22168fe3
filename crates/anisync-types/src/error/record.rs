//! Record decoding and addressing errors.

use crate::Service;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning vendor data into records or addressing them.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum RecordError {
    /// A status string does not map to any known [`crate::Status`].
    /// The record is rejected from the snapshot.
    #[error("Unknown status value: {value}")]
    UnknownStatusValue {
        /// The raw status string as received
        value: String,
    },

    /// The record carries no id for the service under operation
    #[error("Record has no id on {service}")]
    MissingServiceId {
        /// Service that was asked for an id
        service: Service,
    },

    /// A snapshot keyed by one service was offered to a list keyed by another
    #[error("Snapshot keyed by {found} cannot replace a {expected} list")]
    ServiceMismatch {
        /// Service keying the receiving list
        expected: Service,
        /// Service keying the offered snapshot
        found: Service,
    },
}
