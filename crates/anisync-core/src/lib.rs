//! # Anisync Core
//!
//! Reconciliation logic for keeping a local watch-list in sync with remote
//! tracking services.
//!
//! ## Data flow
//!
//! ```text
//! snapshot(t0), snapshot(t1)
//!         │
//!         ▼
//!   diff_snapshots ──► raw changes ──► merge_changes ──► minimal changes
//!                                                            │
//!                                       RequestGenerator ◄───┘
//!                                              │
//!                                       RequestSender::send_many
//!                                              │
//!                              success: archive │ failure: stay pending
//! ```
//!
//! ## Modules
//!
//! - [`collections`]: `OrderedMap` (ascending keys) and `LruMap` (write recency)
//! - [`change`]: the `Add`/`Edit`/`Delete` change model and its request rendering
//! - [`merge`], [`diff`]: the two engines
//! - [`sync`]: tracked lists and the primary/replica manager
//! - [`request`]: collaborator traits implemented by `anisync-client`
//!
//! Nothing in this crate locks internally. One mutation pipeline per local
//! list is assumed; only batch sending is concurrent.

#![cfg_attr(test, allow(clippy::panic, clippy::print_stdout))]

pub mod change;
pub mod collections;
pub mod config;
pub mod diff;
pub mod endpoints;
pub mod merge;
pub mod request;
pub mod sync;

pub use change::Change;
pub use collections::{LruMap, OrderedMap};
pub use config::{load_config, save_config, RetryConfig, SyncConfig};
pub use diff::{apply_changes, diff_snapshots, key_by};
pub use endpoints::{Endpoint, Endpoints};
pub use merge::{merge_changes, MergeEngine};
pub use request::{
    accept_success, RecordSource, RequestGenerator, RequestSender, ResponseValidator,
};
pub use sync::{AnimeList, ListSyncManager, PushedBatch, SyncReport, TrackedList};
