//! Per-service endpoint layout.

use anisync_types::Service;
use serde::{Deserialize, Serialize};

pub const HUMMINGBIRD_BASE_URL: &str = "https://hummingbird.me";
pub const MYANIMELIST_BASE_URL: &str = "https://myanimelist.net";

/// What a request does to one library entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Create,
    Update,
    Remove,
}

/// Base URLs of every service.
///
/// Overridable so tests and self-hosted mirrors can point elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoints {
    #[serde(default = "default_hummingbird")]
    pub hummingbird: String,
    #[serde(default = "default_myanimelist")]
    pub myanimelist: String,
}

fn default_hummingbird() -> String {
    HUMMINGBIRD_BASE_URL.to_string()
}

fn default_myanimelist() -> String {
    MYANIMELIST_BASE_URL.to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            hummingbird: default_hummingbird(),
            myanimelist: default_myanimelist(),
        }
    }
}

impl Endpoints {
    /// Endpoints with every service rooted at `base`.
    pub fn all_at(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            hummingbird: base.clone(),
            myanimelist: base,
        }
    }

    pub fn base(&self, service: Service) -> &str {
        let base = match service {
            Service::Hummingbird => &self.hummingbird,
            Service::MyAnimeList => &self.myanimelist,
        };
        base.trim_end_matches('/')
    }

    /// URL acting on the library entry `id` of `service`.
    pub fn entry_url(&self, service: Service, endpoint: Endpoint, id: u64) -> String {
        let base = self.base(service);
        match service {
            Service::Hummingbird => match endpoint {
                Endpoint::Create | Endpoint::Update => format!("{base}/api/v1/libraries/{id}"),
                Endpoint::Remove => format!("{base}/api/v1/libraries/{id}/remove"),
            },
            Service::MyAnimeList => {
                let action = match endpoint {
                    Endpoint::Create => "add",
                    Endpoint::Update => "update",
                    Endpoint::Remove => "delete",
                };
                format!("{base}/api/animelist/{action}/{id}.xml")
            }
        }
    }

    /// URL listing the whole library of `username` on `service`.
    pub fn library_url(&self, service: Service, username: &str) -> String {
        let base = self.base(service);
        match service {
            Service::Hummingbird => format!("{base}/api/v1/users/{username}/library"),
            Service::MyAnimeList => {
                format!("{base}/malappinfo.php?u={username}&status=all&type=anime")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hummingbird_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.entry_url(Service::Hummingbird, Endpoint::Create, 69),
            "https://hummingbird.me/api/v1/libraries/69"
        );
        assert_eq!(
            endpoints.entry_url(Service::Hummingbird, Endpoint::Remove, 69),
            "https://hummingbird.me/api/v1/libraries/69/remove"
        );
        assert_eq!(
            endpoints.library_url(Service::Hummingbird, "darin"),
            "https://hummingbird.me/api/v1/users/darin/library"
        );
    }

    #[test]
    fn test_myanimelist_urls() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.entry_url(Service::MyAnimeList, Endpoint::Update, 21),
            "https://myanimelist.net/api/animelist/update/21.xml"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let endpoints = Endpoints::all_at("http://127.0.0.1:9000/");
        assert_eq!(
            endpoints.entry_url(Service::Hummingbird, Endpoint::Update, 1),
            "http://127.0.0.1:9000/api/v1/libraries/1"
        );
    }
}
