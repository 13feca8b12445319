use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::game::{ClueSummary, GameSnapshot, GuessSummary};

#[derive(Clone, Debug)]
/// Dispatched payload carried across the SSE channel.
pub struct ServerEvent {
    /// Optional SSE event name.
    pub event: Option<String>,
    /// Serialized data field.
    pub data: String,
}

impl ServerEvent {
    /// Build an event from a pre-rendered data payload.
    pub fn new(event: Option<String>, data: String) -> Self {
        Self { event, data }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the backend enters or leaves degraded mode.
pub struct SystemStatus {
    /// Whether the backend is currently running without storage.
    pub degraded: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
/// Broadcast whenever the shared game state changes (counters, tokens, awards).
pub struct GameUpdatedEvent(pub GameSnapshot);

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast whenever a clue record changes (solve or hint unlock).
pub struct ClueUpdatedEvent {
    /// The clue record after the change.
    pub clue: ClueSummary,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast for every guess submission, right after the log append.
pub struct GuessLoggedEvent {
    /// The appended activity feed entry.
    pub guess: GuessSummary,
}
