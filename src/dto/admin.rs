use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Operator payload that provisions (or re-provisions) the game aggregate.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProvisionGameRequest {
    /// Display title shown in the UI header.
    pub title: String,
    /// RFC 3339 game start; defaults to now when omitted.
    #[serde(default)]
    pub start_time: Option<String>,
    /// RFC 3339 game end; defaults to two hours after the start when omitted.
    #[serde(default)]
    pub end_time: Option<String>,
}

impl Validate for ProvisionGameRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.title.trim().is_empty() {
            let mut err = ValidationError::new("title_blank");
            err.message = Some("Game title must not be blank".into());
            errors.add("title", err);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Summary returned once the aggregate has been provisioned.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProvisionSummary {
    /// Identifier of the provisioned game.
    pub game_id: String,
    /// Display title.
    pub title: String,
    /// Number of clue records created.
    pub clue_count: usize,
    /// RFC 3339 game start.
    pub start_time: String,
    /// RFC 3339 game end.
    pub end_time: String,
}
