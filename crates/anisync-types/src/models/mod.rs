//! Core domain models for anisync.
//!
//! Records and identities shared by every crate, plus the transport-neutral
//! shape of an outbound push request.

mod anime;
mod request;
mod service;
mod status;

pub use anime::{Anime, AnimeId, Snapshot};
pub use request::{Credential, Form, PushRequest, PushResponse};
pub use service::Service;
pub use status::Status;
