//! Collaborator seams around the change model.
//!
//! - [`RequestGenerator`] renders changes into [`PushRequest`]s.
//! - [`RequestSender`] dispatches a batch of requests concurrently.
//! - [`RecordSource`] fetches the current remote snapshot.
//!
//! Transport lives in `anisync-client`; everything here is I/O free.

use crate::change::Change;
use crate::endpoints::Endpoints;
use anisync_types::{
    Credential, Form, PushError, PushRequest, PushResponse, RecordError, Service, Snapshot,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Judges a completed response. `Err` fails the whole batch.
pub type ResponseValidator = Arc<dyn Fn(&PushResponse) -> Result<(), String> + Send + Sync>;

/// Validator accepting any 2xx response.
pub fn accept_success() -> ResponseValidator {
    Arc::new(|response: &PushResponse| {
        if response.is_success() {
            Ok(())
        } else {
            Err(format!("unexpected status {}", response.status))
        }
    })
}

/// Builds outbound requests from changes, attaching one credential to all of them.
#[derive(Debug, Clone)]
pub struct RequestGenerator {
    credential: Credential,
    endpoints: Endpoints,
}

impl RequestGenerator {
    pub fn new(credential: Credential, endpoints: Endpoints) -> Self {
        Self { credential, endpoints }
    }

    /// Request performing `change` (or its undo) on `service`.
    pub fn request(
        &self,
        change: &Change,
        service: Service,
        undo: bool,
    ) -> Result<PushRequest, RecordError> {
        let url = change.url(&self.endpoints, service, undo)?;
        let mut form = Form::new();
        change.fill_form(service, &mut form, undo);
        Ok(PushRequest {
            url,
            form,
            credential: self.credential.clone(),
        })
    }

    /// Requests for a whole batch.
    ///
    /// Undo batches are generated newest first so they unwind in reverse.
    /// Edits that change no pushed field (a new title, a newly learned id on
    /// another service) need no request and are skipped.
    pub fn batch(
        &self,
        changes: &[Change],
        service: Service,
        undo: bool,
    ) -> Result<Vec<PushRequest>, RecordError> {
        let build = |change: &Change| self.request(change, service, undo);
        let pushed = |change: &&Change| !change.is_noop();
        if undo {
            changes.iter().rev().filter(pushed).map(build).collect()
        } else {
            changes.iter().filter(pushed).map(build).collect()
        }
    }
}

/// Sends a batch of requests concurrently.
///
/// Implementations must dispatch every request at once, bound the whole
/// batch by `timeout`, and report the first transport error, timeout or
/// validator rejection as the batch result. Requests still in flight when
/// the batch fails are not required to be cancelled; their results are
/// ignored.
#[async_trait]
pub trait RequestSender: Send + Sync {
    async fn send_many(
        &self,
        requests: Vec<PushRequest>,
        timeout: Duration,
        validator: ResponseValidator,
    ) -> Result<(), PushError>;
}

/// Fetches the full current record set of one remote service.
#[async_trait]
pub trait RecordSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Service whose id space keys the returned snapshot.
    fn service(&self) -> Service;

    async fn fetch(&self) -> Result<Snapshot, Self::Error>;
}
