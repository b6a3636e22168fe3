//! Watch-list records and their cross-service identity.

use super::{Service, Status};
use crate::RecordError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full identity-keyed set of records at one point in time, keyed by the id
/// on the service the snapshot was taken from.
pub type Snapshot = BTreeMap<u64, Anime>;

/// Cross-service identity of one logical watch-list entry.
///
/// Each service assigns its own integer id. An id of zero means the title is
/// not known on that service, and [`AnimeId::get`] reports it as absent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct AnimeId {
    /// hummingbird.me anime id
    #[serde(default)]
    pub hummingbird: u64,
    /// myanimelist.net anime id
    #[serde(default)]
    pub myanimelist: u64,
}

impl AnimeId {
    /// Identity known on a single service.
    pub fn on(service: Service, id: u64) -> Self {
        Self::default().with(service, id)
    }

    /// Copy of this identity with the id for `service` replaced.
    #[must_use]
    pub const fn with(mut self, service: Service, id: u64) -> Self {
        match service {
            Service::Hummingbird => self.hummingbird = id,
            Service::MyAnimeList => self.myanimelist = id,
        }
        self
    }

    /// Id on `service`, or `None` when unknown there.
    pub const fn get(&self, service: Service) -> Option<u64> {
        let id = match service {
            Service::Hummingbird => self.hummingbird,
            Service::MyAnimeList => self.myanimelist,
        };
        if id == 0 {
            None
        } else {
            Some(id)
        }
    }

    /// Id on `service`, failing when the record cannot be addressed there.
    pub fn require(&self, service: Service) -> Result<u64, RecordError> {
        self.get(service).ok_or(RecordError::MissingServiceId { service })
    }
}

/// One watch-list entry.
///
/// Records are immutable values: the `with_*` methods consume the record and
/// return an edited copy, they never touch a record held elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Anime {
    id: AnimeId,
    title: String,
    status: Status,
    episodes_watched: u32,
    rewatched_times: u32,
    rewatching: bool,
}

impl Anime {
    /// Create a record with default tracking fields.
    pub fn new(id: AnimeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Self::default()
        }
    }

    pub const fn id(&self) -> AnimeId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    pub const fn episodes_watched(&self) -> u32 {
        self.episodes_watched
    }

    pub const fn rewatched_times(&self) -> u32 {
        self.rewatched_times
    }

    pub const fn rewatching(&self) -> bool {
        self.rewatching
    }

    #[must_use]
    pub fn with_id(mut self, id: AnimeId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub const fn with_episodes_watched(mut self, episodes: u32) -> Self {
        self.episodes_watched = episodes;
        self
    }

    #[must_use]
    pub const fn with_rewatched_times(mut self, times: u32) -> Self {
        self.rewatched_times = times;
        self
    }

    #[must_use]
    pub const fn with_rewatching(mut self, rewatching: bool) -> Self {
        self.rewatching = rewatching;
        self
    }
}
