//! # Anisync Client
//!
//! HTTP collaborators for `anisync-core`:
//!
//! - [`HttpSender`] implements [`anisync_core::RequestSender`]: one task per
//!   request, one deadline for the whole batch.
//! - [`HummingbirdSource`] implements [`anisync_core::RecordSource`] on top of
//!   the hummingbird.me v1 library endpoint, retrying rate limits and
//!   server errors with exponential backoff.
//!
//! [`decode_library`] turns a raw library dump into a snapshot without any
//! network access.

mod error;
mod sender;
mod source;
mod types;

pub use error::ClientError;
pub use sender::HttpSender;
pub use source::HummingbirdSource;
pub use types::*;
