//! Remote tracking services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A remote tracking service that a watch-list can be synced with.
///
/// The set is closed: adding a service means adding a variant here, and the
/// compiler then points at every `match` that needs a new arm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    /// hummingbird.me library API
    Hummingbird,
    /// myanimelist.net list API
    MyAnimeList,
}

impl Service {
    /// Every supported service, in declaration order.
    pub const ALL: [Service; 2] = [Service::Hummingbird, Service::MyAnimeList];

    /// Stable lowercase name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hummingbird => "hummingbird",
            Self::MyAnimeList => "myanimelist",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
