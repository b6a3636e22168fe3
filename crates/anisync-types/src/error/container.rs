//! Ordered container errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by `OrderedMap` and `LruMap` lookups.
#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ContainerError {
    /// The key is not present in the container
    #[error("Key {key} is not in the map")]
    KeyNotFound {
        /// Key that was looked up
        key: u64,
    },
}
