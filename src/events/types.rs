//! Event data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event as stored by the backend.
///
/// Stored rows are not re-validated, so any text field may come back as
/// `null` or be missing. Times are passed through exactly as the backend
/// sends them (local date-times such as `2024-01-01T10:00`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub capacity: u32,
}

/// Payload for creating or replacing an event (an [`Event`] without `id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub capacity: u32,
}

impl Default for NewEvent {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            location: String::new(),
            capacity: 1,
        }
    }
}

/// Missing fields become empty strings, which [`NewEvent::validate`] rejects
/// where they are required.
impl From<Event> for NewEvent {
    fn from(event: Event) -> Self {
        Self {
            name: event.name.unwrap_or_default(),
            description: event.description.unwrap_or_default(),
            start_time: event.start_time.unwrap_or_default(),
            end_time: event.end_time.unwrap_or_default(),
            location: event.location.unwrap_or_default(),
            capacity: event.capacity,
        }
    }
}

/// Backend health report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
