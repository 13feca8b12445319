use axum::{Json, Router, extract::State, routing::post};
use axum_valid::Valid;

use crate::{
    dto::admin::{ProvisionGameRequest, ProvisionSummary},
    error::AppError,
    services::admin_service,
    state::SharedState,
};

/// Operator endpoints for provisioning the game aggregate.
pub fn router() -> Router<SharedState> {
    Router::new().route("/admin/game", post(provision_game))
}

/// Create or overwrite the game document and its fifty clue records.
#[utoipa::path(
    post,
    path = "/admin/game",
    tag = "admin",
    request_body = ProvisionGameRequest,
    responses(
        (status = 200, description = "Game provisioned", body = ProvisionSummary),
        (status = 400, description = "Blank title or malformed timestamp")
    )
)]
pub async fn provision_game(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<ProvisionGameRequest>>,
) -> Result<Json<ProvisionSummary>, AppError> {
    let summary = admin_service::provision_game(&state, payload).await?;
    Ok(Json(summary))
}
