use axum::{Json, Router, extract::State, routing::post};
use axum_valid::Valid;

use crate::{
    dto::game::{GuessRequest, GuessResponse, HintResponse, PurchaseRequest, RevealResponse},
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes for the three mutation operations.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/game/guess", post(submit_guess))
        .route("/game/hint", post(use_hint))
        .route("/game/reveal", post(reveal_solution))
}

/// Submit a guess for a clue.
#[utoipa::path(
    post,
    path = "/game/guess",
    tag = "game",
    request_body = GuessRequest,
    responses(
        (status = 200, description = "Guess evaluated", body = GuessResponse),
        (status = 400, description = "Missing or empty required field"),
        (status = 404, description = "Unknown clue or unprovisioned game")
    )
)]
pub async fn submit_guess(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<GuessRequest>>,
) -> Result<Json<GuessResponse>, AppError> {
    let result = game_service::submit_guess(&state, payload).await?;
    Ok(Json(result))
}

/// Purchase the hint of a clue for one token.
#[utoipa::path(
    post,
    path = "/game/hint",
    tag = "game",
    request_body = PurchaseRequest,
    responses(
        (status = 200, description = "Hint unlocked (or already unlocked)", body = HintResponse),
        (status = 400, description = "Missing or empty required field"),
        (status = 404, description = "Unknown clue or unprovisioned game"),
        (status = 409, description = "Insufficient tokens under the minimum-balance policy")
    )
)]
pub async fn use_hint(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<PurchaseRequest>>,
) -> Result<Json<HintResponse>, AppError> {
    let result = game_service::use_hint(&state, payload).await?;
    Ok(Json(result))
}

/// Reveal the solution of a clue for three tokens.
#[utoipa::path(
    post,
    path = "/game/reveal",
    tag = "game",
    request_body = PurchaseRequest,
    responses(
        (status = 200, description = "Solution revealed (or already solved)", body = RevealResponse),
        (status = 400, description = "Missing or empty required field"),
        (status = 404, description = "Unknown clue or unprovisioned game"),
        (status = 409, description = "Insufficient tokens under the minimum-balance policy")
    )
)]
pub async fn reveal_solution(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<PurchaseRequest>>,
) -> Result<Json<RevealResponse>, AppError> {
    let result = game_service::reveal_solution(&state, payload).await?;
    Ok(Json(result))
}
