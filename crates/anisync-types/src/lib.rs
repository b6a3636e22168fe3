//! # Anisync Types
//!
//! Core types, models, and error definitions for anisync.
//!
//! This crate provides the foundational type system shared by the other crates:
//!
//! - **`error`** - Typed error hierarchy for records, containers, pushes, and configuration
//! - **`models`** - Domain models (Anime, AnimeId, Service, Status) and the outbound request shape
//!
//! ## Architecture Role
//!
//! `anisync-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!                anisync-types (this crate)
//!                        │
//!                  anisync-core
//!                        │
//!                 anisync-client
//!                        │
//!                   anisync-cli
//! ```
//!
//! Records are immutable values: edits build a new [`Anime`] instead of
//! mutating one in place.

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{ConfigError, ContainerError, PushError, RecordError, Result, TypedError};

// Re-export core model types
pub use models::{
    Anime, AnimeId, Credential, Form, PushRequest, PushResponse, Service, Snapshot, Status,
};
