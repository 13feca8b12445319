//! Service helpers that expose read-only public projections of the game.

use crate::{
    dao::models::GAME_ID,
    dto::game::{ClueBoard, GameSnapshot, GuessFeed},
    error::ServiceError,
    state::SharedState,
};

/// Number of entries served by the activity feed.
pub const FEED_LIMIT: usize = 25;

/// Return the shared game state projection.
pub async fn game_snapshot(state: &SharedState) -> Result<GameSnapshot, ServiceError> {
    let store = state.require_game_store().await?;
    let game = store
        .find_game(GAME_ID)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("game `{GAME_ID}` is not provisioned")))?;
    Ok(game.into())
}

/// Return every clue record in catalog order, answers and hints withheld
/// until earned.
pub async fn clue_board(state: &SharedState) -> Result<ClueBoard, ServiceError> {
    let store = state.require_game_store().await?;
    let clues = store.list_clues(GAME_ID).await?;
    if clues.is_empty() {
        return Err(ServiceError::NotFound(format!(
            "game `{GAME_ID}` is not provisioned"
        )));
    }
    Ok(ClueBoard {
        clues: clues.into_iter().map(Into::into).collect(),
    })
}

/// Return the most recent guesses, newest first, capped at [`FEED_LIMIT`].
pub async fn recent_feed(state: &SharedState) -> Result<GuessFeed, ServiceError> {
    let store = state.require_game_store().await?;
    let guesses = store.recent_guesses(GAME_ID, FEED_LIMIT).await?;
    Ok(GuessFeed {
        guesses: guesses.into_iter().map(Into::into).collect(),
    })
}
