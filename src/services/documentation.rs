use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the escape-room backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::public_stream,
        crate::routes::game::submit_guess,
        crate::routes::game::use_hint,
        crate::routes::game::reveal_solution,
        crate::routes::public::get_game,
        crate::routes::public::get_clues,
        crate::routes::public::get_feed,
        crate::routes::admin::provision_game,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::GuessRequest,
            crate::dto::game::GuessResponse,
            crate::dto::game::PurchaseRequest,
            crate::dto::game::HintResponse,
            crate::dto::game::RevealResponse,
            crate::dto::game::GameSnapshot,
            crate::dto::game::ClueBoard,
            crate::dto::game::GuessFeed,
            crate::dto::admin::ProvisionGameRequest,
            crate::dto::admin::ProvisionSummary,
            crate::dto::sse::SystemStatus,
            crate::clues::Category,
        )
    ),
    tags(
        (name = "game", description = "Guess, hint, and reveal operations"),
        (name = "public", description = "Read-only game projections"),
        (name = "admin", description = "Operator provisioning"),
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events stream"),
    )
)]
pub struct ApiDoc;
