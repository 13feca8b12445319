//! Operator-facing provisioning: the one-time administrative step that
//! creates the game document and its fifty clue records.

use std::time::{Duration, SystemTime};

use tracing::info;

use crate::{
    clues,
    dao::models::{ClueRecordEntity, GAME_ID, GameStateEntity},
    dto::{
        admin::{ProvisionGameRequest, ProvisionSummary},
        format_system_time, parse_rfc3339,
    },
    error::ServiceError,
    services::sse_events,
    state::SharedState,
};

/// Game length applied when the operator omits an end time.
const DEFAULT_GAME_DURATION: Duration = Duration::from_secs(2 * 60 * 60);

/// Create (or overwrite) the game aggregate: zeroed counters, category
/// totals from the catalog, and one fresh record per clue.
pub async fn provision_game(
    state: &SharedState,
    request: ProvisionGameRequest,
) -> Result<ProvisionSummary, ServiceError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(ServiceError::InvalidInput(
            "`title` is required and must not be empty".into(),
        ));
    }

    let start_time = parse_time_field(request.start_time.as_deref(), "start_time")?
        .unwrap_or_else(SystemTime::now);
    let end_time = parse_time_field(request.end_time.as_deref(), "end_time")?
        .unwrap_or(start_time + DEFAULT_GAME_DURATION);

    if end_time <= start_time {
        return Err(ServiceError::InvalidInput(
            "`end_time` must be after `start_time`".into(),
        ));
    }

    let game = GameStateEntity::new(title.to_owned(), start_time, end_time);
    let records: Vec<ClueRecordEntity> = clues::all()
        .map(|def| {
            ClueRecordEntity::fresh(def.id, def.category, format!("Hint for clue {}", def.id))
        })
        .collect();
    let clue_count = records.len();

    let store = state.require_game_store().await?;
    let gate = state.aggregate_gate(GAME_ID);
    let _guard = gate.lock().await;

    store.provision_game(game.clone(), records).await?;

    info!(
        game_id = GAME_ID,
        title = %game.title,
        clue_count,
        "game provisioned"
    );
    sse_events::broadcast_game_updated(state, game.clone());

    Ok(ProvisionSummary {
        game_id: GAME_ID.to_owned(),
        title: game.title,
        clue_count,
        start_time: format_system_time(start_time),
        end_time: format_system_time(end_time),
    })
}

fn parse_time_field(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<SystemTime>, ServiceError> {
    match value {
        None => Ok(None),
        Some(raw) => parse_rfc3339(raw).map(Some).map_err(|err| {
            ServiceError::InvalidInput(format!("`{field}` is not a valid RFC 3339 timestamp: {err}"))
        }),
    }
}
