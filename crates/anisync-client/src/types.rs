use anisync_core::RetryConfig;
use anisync_types::{Anime, AnimeId, RecordError, Service, Snapshot, Status};
use serde::{Deserialize, Serialize};

use crate::ClientError;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-request transport timeout.
    pub timeout_secs: u64,
    pub user_agent: String,
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("anisync/", env!("CARGO_PKG_VERSION")).to_string(),
            retry: RetryConfig::default(),
        }
    }
}

/// One entry of a hummingbird.me v1 library listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibraryEntry {
    #[serde(default)]
    pub episodes_watched: u32,
    pub status: String,
    #[serde(default)]
    pub rewatched_times: u32,
    #[serde(default)]
    pub rewatching: bool,
    pub anime: LibraryAnime,
}

/// The anime an entry refers to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibraryAnime {
    pub id: u64,
    /// Null for titles myanimelist.net does not know.
    #[serde(default)]
    pub mal_id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub episode_count: Option<u32>,
}

impl LibraryEntry {
    pub fn into_anime(self) -> Result<Anime, RecordError> {
        let status = Status::from_wire(Service::Hummingbird, &self.status)?;
        let id = AnimeId::on(Service::Hummingbird, self.anime.id)
            .with(Service::MyAnimeList, self.anime.mal_id.unwrap_or(0));
        Ok(Anime::new(id, self.anime.title)
            .with_status(status)
            .with_episodes_watched(self.episodes_watched)
            .with_rewatched_times(self.rewatched_times)
            .with_rewatching(self.rewatching))
    }
}

/// Decode a hummingbird.me library listing into a snapshot keyed by
/// hummingbird id.
///
/// Entries with a status outside the known set are logged and left out.
pub fn decode_library(body: &str) -> Result<Snapshot, ClientError> {
    let entries: Vec<LibraryEntry> =
        serde_json::from_str(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
    let total = entries.len();

    let mut snapshot = Snapshot::new();
    for entry in entries {
        let id = entry.anime.id;
        match entry.into_anime() {
            Ok(anime) => {
                snapshot.insert(id, anime);
            }
            Err(e) => tracing::warn!(id, "skipping library entry: {}", e),
        }
    }

    tracing::debug!(total, kept = snapshot.len(), "decoded library");
    Ok(snapshot)
}
