//! Typed error definitions for anisync.
//!
//! Each domain gets its own enum so callers can match on the exact failure:
//!
//! - [`RecordError`] for records that cannot be decoded or addressed
//! - [`ContainerError`] for lookups that miss
//! - [`PushError`] for undo and batch push failures
//! - [`ConfigError`] for configuration files
//!
//! There is deliberately no "invalid service" error: [`crate::Service`] is a
//! closed enum and every per-service `match` is exhaustive.

mod config;
mod container;
mod push;
mod record;

pub use config::ConfigError;
pub use container::ContainerError;
pub use push::PushError;
pub use record::RecordError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type that wraps all domain-specific errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum TypedError {
    /// Wraps a record decoding or addressing error
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Wraps a container lookup error
    #[error("Container error: {0}")]
    Container(#[from] ContainerError),

    /// Wraps an undo or push error
    #[error("Push error: {0}")]
    Push(#[from] PushError),

    /// Wraps a configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Standard Result type using TypedError.
pub type Result<T> = std::result::Result<T, TypedError>;
