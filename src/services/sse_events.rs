//! Typed broadcast helpers that turn committed writes into public SSE events.

use serde::Serialize;
use tracing::warn;

use crate::{
    dao::models::{ClueRecordEntity, GameStateEntity, GuessEntity},
    dto::sse::{ClueUpdatedEvent, GameUpdatedEvent, GuessLoggedEvent, ServerEvent, SystemStatus},
    state::SharedState,
};

const EVENT_GAME_UPDATED: &str = "game.updated";
const EVENT_CLUE_UPDATED: &str = "clue.updated";
const EVENT_GUESS_LOGGED: &str = "guess.logged";
const EVENT_SYSTEM_STATUS: &str = "system.status";

/// Broadcast the updated game state after a committed counter change.
pub fn broadcast_game_updated(state: &SharedState, game: GameStateEntity) {
    let payload = GameUpdatedEvent(game.into());
    send_public_event(state, EVENT_GAME_UPDATED, &payload);
}

/// Broadcast an updated clue record after a solve or hint unlock.
pub fn broadcast_clue_updated(state: &SharedState, clue: ClueRecordEntity) {
    let payload = ClueUpdatedEvent { clue: clue.into() };
    send_public_event(state, EVENT_CLUE_UPDATED, &payload);
}

/// Broadcast a freshly appended guess log entry.
pub fn broadcast_guess_logged(state: &SharedState, guess: GuessEntity) {
    let payload = GuessLoggedEvent {
        guess: guess.into(),
    };
    send_public_event(state, EVENT_GUESS_LOGGED, &payload);
}

/// Broadcast a degraded-mode flip so UIs can show a storage banner.
pub fn broadcast_system_status(state: &SharedState, degraded: bool) {
    let payload = SystemStatus { degraded };
    send_public_event(state, EVENT_SYSTEM_STATUS, &payload);
}

fn send_public_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.public_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize public SSE payload"),
    }
}
