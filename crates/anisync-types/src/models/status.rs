//! Watch status and its per-service wire encodings.

use crate::{RecordError, Service};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a title sits on the watch-list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Currently being watched
    #[default]
    Watching,
    /// Finished
    Completed,
    /// Paused
    OnHold,
    /// Abandoned
    Dropped,
    /// Not started yet
    PlanToWatch,
}

impl Status {
    /// Encode the status the way `service` expects it in a form body.
    pub const fn wire_value(self, service: Service) -> &'static str {
        match service {
            Service::Hummingbird => match self {
                Self::Watching => "currently-watching",
                Self::Completed => "completed",
                Self::OnHold => "on-hold",
                Self::Dropped => "dropped",
                Self::PlanToWatch => "plan-to-watch",
            },
            Service::MyAnimeList => match self {
                Self::Watching => "1",
                Self::Completed => "2",
                Self::OnHold => "3",
                Self::Dropped => "4",
                Self::PlanToWatch => "6",
            },
        }
    }

    /// Decode a status string received from `service`.
    ///
    /// Unknown values are an error: the caller rejects the record instead of
    /// guessing a status for it.
    pub fn from_wire(service: Service, value: &str) -> Result<Self, RecordError> {
        let status = match service {
            Service::Hummingbird => match value {
                "currently-watching" => Self::Watching,
                "completed" => Self::Completed,
                "on-hold" => Self::OnHold,
                "dropped" => Self::Dropped,
                "plan-to-watch" => Self::PlanToWatch,
                _ => return Err(RecordError::UnknownStatusValue { value: value.to_string() }),
            },
            Service::MyAnimeList => match value {
                "1" => Self::Watching,
                "2" => Self::Completed,
                "3" => Self::OnHold,
                "4" => Self::Dropped,
                "6" => Self::PlanToWatch,
                _ => return Err(RecordError::UnknownStatusValue { value: value.to_string() }),
            },
        };
        Ok(status)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Watching => write!(f, "watching"),
            Self::Completed => write!(f, "completed"),
            Self::OnHold => write!(f, "on hold"),
            Self::Dropped => write!(f, "dropped"),
            Self::PlanToWatch => write!(f, "plan to watch"),
        }
    }
}
