//! Local lists and primary/replica synchronisation.
//!
//! - [`TrackedList`]: one service's records plus its pending and pushed changes
//! - [`ListSyncManager`]: fans mutations out from a primary list to replicas

mod list;
mod manager;


pub use list::{AnimeList, PushedBatch, TrackedList};
pub use manager::{ListSyncManager, SyncReport};
