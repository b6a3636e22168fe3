//! Sync configuration: which service is primary, credentials, push limits.
//!
//! Stored as pretty JSON. A missing file means defaults.

use crate::endpoints::Endpoints;
use anisync_types::{ConfigError, Credential, Service};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = "anisync";
const CONFIG_FILE: &str = "config.json";

/// hummingbird.me account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HummingbirdAccount {
    pub username: String,
    pub auth_token: String,
}

/// myanimelist.net account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MyAnimeListAccount {
    pub username: String,
    pub password: String,
}

/// Retry behavior for fetching remote lists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds.
    pub base_delay_ms: u64,
    /// Maximum delay between retries in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Service whose list is the source of truth
    pub primary: Service,
    /// Services mirrored from the primary, in update order
    pub replicas: Vec<Service>,
    /// Deadline for a whole push batch
    pub push_timeout_secs: u64,
    pub hummingbird: Option<HummingbirdAccount>,
    pub myanimelist: Option<MyAnimeListAccount>,
    pub retry: RetryConfig,
    pub endpoints: Endpoints,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            primary: Service::Hummingbird,
            replicas: Vec::new(),
            push_timeout_secs: 10,
            hummingbird: None,
            myanimelist: None,
            retry: RetryConfig::default(),
            endpoints: Endpoints::default(),
        }
    }
}

impl SyncConfig {
    pub const fn push_timeout(&self) -> Duration {
        Duration::from_secs(self.push_timeout_secs)
    }

    /// Account name used to look up the library on `service`.
    pub fn username(&self, service: Service) -> Option<&str> {
        match service {
            Service::Hummingbird => self.hummingbird.as_ref().map(|a| a.username.as_str()),
            Service::MyAnimeList => self.myanimelist.as_ref().map(|a| a.username.as_str()),
        }
    }

    /// Credential attached to every push request for `service`.
    pub fn credential(&self, service: Service) -> Result<Credential, ConfigError> {
        let credential = match service {
            Service::Hummingbird => self
                .hummingbird
                .as_ref()
                .map(|account| Credential::token(account.auth_token.clone())),
            Service::MyAnimeList => self
                .myanimelist
                .as_ref()
                .map(|account| Credential::basic(&account.username, &account.password)),
        };
        credential.ok_or_else(|| ConfigError::invalid(service.as_str(), "no account configured"))
    }

    /// Services this config touches: the primary first, then replicas.
    pub fn services(&self) -> impl Iterator<Item = Service> + '_ {
        std::iter::once(self.primary).chain(self.replicas.iter().copied())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.push_timeout_secs == 0 {
            return Err(ConfigError::invalid("push_timeout_secs", "must be greater than zero"));
        }

        let mut seen = HashSet::new();
        for service in self.services() {
            if !seen.insert(service) {
                return Err(ConfigError::invalid(
                    "replicas",
                    format!("{service} is listed more than once"),
                ));
            }
        }
        Ok(())
    }
}

/// `<config dir>/anisync/config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .ok_or_else(|| ConfigError::NotFound { path: "<config dir>".to_string() })
}

/// Load and validate the config at `path`; defaults when the file is absent.
pub fn load_config(path: &Path) -> Result<SyncConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(SyncConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
        message: format!("failed to read {}: {}", path.display(), e),
    })?;
    let config: SyncConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    config.validate()?;
    Ok(config)
}

/// Write `config` to `path` atomically (temp file, then rename).
pub fn save_config(path: &Path, config: &SyncConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::from_io_error(&e))?;
    }
    let temp_path = path.with_extension("json.tmp");

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| ConfigError::WriteError { message: e.to_string() })?;

    fs::write(&temp_path, content).map_err(|e| ConfigError::from_io_error(&e))?;
    fs::rename(&temp_path, path).map_err(|e| ConfigError::from_io_error(&e))
}
