use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::game::{ClueBoard, GameSnapshot, GuessFeed},
    error::AppError,
    services::public_service,
    state::SharedState,
};

/// Read-only projections consumed by the scoreboard UI.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/game", get(get_game))
        .route("/game/clues", get(get_clues))
        .route("/game/feed", get(get_feed))
}

/// Current game state: counters, tokens, category progress.
#[utoipa::path(
    get,
    path = "/game",
    tag = "public",
    responses(
        (status = 200, description = "Game snapshot", body = GameSnapshot),
        (status = 404, description = "Game not provisioned")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
) -> Result<Json<GameSnapshot>, AppError> {
    Ok(Json(public_service::game_snapshot(&state).await?))
}

/// The clue board, answers and hints withheld until earned.
#[utoipa::path(
    get,
    path = "/game/clues",
    tag = "public",
    responses(
        (status = 200, description = "Clue board", body = ClueBoard),
        (status = 404, description = "Game not provisioned")
    )
)]
pub async fn get_clues(State(state): State<SharedState>) -> Result<Json<ClueBoard>, AppError> {
    Ok(Json(public_service::clue_board(&state).await?))
}

/// Live activity feed: most recent guesses, newest first.
#[utoipa::path(
    get,
    path = "/game/feed",
    tag = "public",
    responses((status = 200, description = "Recent guesses", body = GuessFeed))
)]
pub async fn get_feed(State(state): State<SharedState>) -> Result<Json<GuessFeed>, AppError> {
    Ok(Json(public_service::recent_feed(&state).await?))
}
