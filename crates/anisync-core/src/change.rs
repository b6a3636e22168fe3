//! The change model: one pending mutation of a watch-list.
//!
//! A [`Change`] knows how to render itself as a request against any
//! [`Service`], in either direction. `undo = true` renders the request that
//! reverses the change:
//!
//! | change   | `undo = false`          | `undo = true`            |
//! |----------|-------------------------|--------------------------|
//! | `Add`    | create, full form       | remove, empty form       |
//! | `Edit`   | update, new values      | update, old values       |
//! | `Delete` | remove, empty form      | create, full form        |

use crate::endpoints::{Endpoint, Endpoints};
use anisync_types::{Anime, Form, RecordError, Service};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One pending mutation of a watch-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    /// The record does not exist remotely and must be created.
    Add { anime: Anime },
    /// The record exists; fields that differ between `old` and `new` must be pushed.
    Edit { old: Anime, new: Anime },
    /// The record must be removed remotely.
    Delete { anime: Anime },
}

/// Fields pushed to a remote service. The title is never pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackedField {
    Status,
    Rewatching,
    RewatchedTimes,
    EpisodesWatched,
}

impl TrackedField {
    const ALL: [TrackedField; 4] =
        [Self::Status, Self::Rewatching, Self::RewatchedTimes, Self::EpisodesWatched];

    const fn key(self, service: Service) -> &'static str {
        match service {
            Service::Hummingbird => match self {
                Self::Status => "status",
                Self::Rewatching => "rewatching",
                Self::RewatchedTimes => "rewatched_times",
                Self::EpisodesWatched => "episodes_watched",
            },
            Service::MyAnimeList => match self {
                Self::Status => "status",
                Self::Rewatching => "enable_rewatching",
                Self::RewatchedTimes => "times_rewatched",
                Self::EpisodesWatched => "episode",
            },
        }
    }

    fn render(self, anime: &Anime, service: Service) -> String {
        match self {
            Self::Status => anime.status().wire_value(service).to_string(),
            Self::Rewatching => render_bool(anime.rewatching(), service).to_string(),
            Self::RewatchedTimes => anime.rewatched_times().to_string(),
            Self::EpisodesWatched => anime.episodes_watched().to_string(),
        }
    }

    fn differs(self, a: &Anime, b: &Anime) -> bool {
        match self {
            Self::Status => a.status() != b.status(),
            Self::Rewatching => a.rewatching() != b.rewatching(),
            Self::RewatchedTimes => a.rewatched_times() != b.rewatched_times(),
            Self::EpisodesWatched => a.episodes_watched() != b.episodes_watched(),
        }
    }

    fn write(self, anime: &Anime, service: Service, form: &mut Form) {
        form.set(self.key(service), self.render(anime, service));
    }
}

const fn render_bool(value: bool, service: Service) -> &'static str {
    match (service, value) {
        (Service::Hummingbird, true) => "true",
        (Service::Hummingbird, false) => "false",
        (Service::MyAnimeList, true) => "1",
        (Service::MyAnimeList, false) => "0",
    }
}

fn write_all(anime: &Anime, service: Service, form: &mut Form) {
    for field in TrackedField::ALL {
        field.write(anime, service, form);
    }
}

impl Change {
    /// The record that identifies this change: the new state for edits.
    pub const fn anime(&self) -> &Anime {
        match self {
            Self::Add { anime } | Self::Delete { anime } => anime,
            Self::Edit { new, .. } => new,
        }
    }

    /// Id of the affected record on `service`.
    pub fn id_on(&self, service: Service) -> Result<u64, RecordError> {
        self.anime().id().require(service)
    }

    /// The change that reverses this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match self {
            Self::Add { anime } => Self::Delete { anime: anime.clone() },
            Self::Edit { old, new } => Self::Edit { old: new.clone(), new: old.clone() },
            Self::Delete { anime } => Self::Add { anime: anime.clone() },
        }
    }

    /// Endpoint hit by this change, or by its undo.
    pub const fn endpoint(&self, undo: bool) -> Endpoint {
        match self {
            Self::Add { .. } => add_endpoint(undo),
            Self::Edit { .. } => Endpoint::Update,
            Self::Delete { .. } => add_endpoint(!undo),
        }
    }

    /// Request URL on `service`.
    ///
    /// `Delete` is the mirror of `Add`: `Delete.url(s, undo)` equals
    /// `Add.url(s, !undo)` for the same record. `Edit` ignores `undo`.
    pub fn url(
        &self,
        endpoints: &Endpoints,
        service: Service,
        undo: bool,
    ) -> Result<String, RecordError> {
        let id = self.id_on(service)?;
        Ok(endpoints.entry_url(service, self.endpoint(undo), id))
    }

    /// Write the request body fields for `service` into `form`.
    ///
    /// Bodies only ever carry tracked fields. Removing needs no body, and an
    /// edit never writes a field that is the same on both sides.
    pub fn fill_form(&self, service: Service, form: &mut Form, undo: bool) {
        match self {
            Self::Add { anime } => {
                if !undo {
                    write_all(anime, service, form);
                }
            }
            Self::Delete { anime } => {
                if undo {
                    write_all(anime, service, form);
                }
            }
            Self::Edit { old, new } => {
                let source = if undo { old } else { new };
                for field in TrackedField::ALL.into_iter().filter(|f| f.differs(old, new)) {
                    field.write(source, service, form);
                }
            }
        }
    }

    /// True for an edit whose two sides push nothing.
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Edit { old, new } => {
                !TrackedField::ALL.into_iter().any(|field| field.differs(old, new))
            }
            Self::Add { .. } | Self::Delete { .. } => false,
        }
    }
}

const fn add_endpoint(undo: bool) -> Endpoint {
    if undo {
        Endpoint::Remove
    } else {
        Endpoint::Create
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { anime } => write!(f, "+ {} ({})", anime.title(), anime.status()),
            Self::Edit { old, new } => write!(
                f,
                "~ {} ({} ep {} -> {} ep {})",
                new.title(),
                old.status(),
                old.episodes_watched(),
                new.status(),
                new.episodes_watched()
            ),
            Self::Delete { anime } => write!(f, "- {}", anime.title()),
        }
    }
}
