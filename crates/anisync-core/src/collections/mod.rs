//! Integer-keyed containers with deterministic iteration order.
//!
//! - [`OrderedMap`] iterates in ascending key order.
//! - [`LruMap`] iterates from least- to most-recently written.
//!
//! Neither type locks internally; callers serialize access.

mod lru_map;
mod ordered_map;

pub use lru_map::{IntoIter as LruIntoIter, Iter as LruIter, LruMap};
pub use ordered_map::OrderedMap;
