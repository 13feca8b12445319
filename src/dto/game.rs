use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    clues::Category,
    dao::models::{ClueRecordEntity, GameStateEntity, GuessEntity},
    dto::{
        format_system_time,
        validation::{validate_display_name, validate_guess_text},
    },
};

/// Payload submitted when a player attempts an answer.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GuessRequest {
    /// Catalog id of the targeted clue.
    pub clue_id: u8,
    /// Raw guess text; matching is case-insensitive and trimmed.
    pub guess: String,
    /// Display name of the submitting player.
    pub player_name: String,
}

impl Validate for GuessRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_guess_text(&self.guess) {
            errors.add("guess", e);
        }
        if let Err(e) = validate_display_name(&self.player_name) {
            errors.add("player_name", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Payload submitted when a player buys a hint or reveals a solution.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PurchaseRequest {
    /// Catalog id of the targeted clue.
    pub clue_id: u8,
    /// Display name of the purchasing player.
    pub player_name: String,
}

impl Validate for PurchaseRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_display_name(&self.player_name) {
            errors.add("player_name", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Outcome of a guess submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct GuessResponse {
    /// Whether the guess solved the clue.
    pub correct: bool,
    /// Present (and `true`) when the clue was already solved beforehand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_solved: Option<bool>,
}

/// Outcome of a hint purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HintResponse {
    /// Whether the purchase went through (or was already complete).
    pub success: bool,
    /// Present (and `true`) when the hint was already unlocked beforehand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_unlocked: Option<bool>,
}

/// Outcome of a solution reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RevealResponse {
    /// Whether the reveal went through (or was already complete).
    pub success: bool,
    /// Present (and `true`) when the clue was already solved beforehand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_solved: Option<bool>,
}

/// Per-category progress row in the game snapshot.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryProgress {
    /// Category the row describes.
    pub category: Category,
    /// Clues in the category.
    pub total: u32,
    /// Clues solved so far.
    pub solved: u32,
}

/// Public projection of the shared game state.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GameSnapshot {
    /// Display title of the game.
    pub title: String,
    /// RFC 3339 start time.
    pub start_time: String,
    /// RFC 3339 end time.
    pub end_time: String,
    /// Cumulative solves.
    pub total_solved: u32,
    /// Current token balance (may be negative).
    pub tokens: i64,
    /// Tokens spent on hints and reveals.
    pub tokens_spent: u32,
    /// Per-category progress in display order.
    pub category_stats: Vec<CategoryProgress>,
    /// Categories that have paid out their completion bonus.
    pub completed_categories: Vec<Category>,
}

impl From<GameStateEntity> for GameSnapshot {
    fn from(entity: GameStateEntity) -> Self {
        Self {
            title: entity.title,
            start_time: format_system_time(entity.start_time),
            end_time: format_system_time(entity.end_time),
            total_solved: entity.total_solved,
            tokens: entity.tokens,
            tokens_spent: entity.tokens_spent,
            category_stats: entity
                .category_stats
                .into_iter()
                .map(|(category, stats)| CategoryProgress {
                    category,
                    total: stats.total,
                    solved: stats.solved,
                })
                .collect(),
            completed_categories: entity.completed_categories,
        }
    }
}

/// Public projection of one clue record. The canonical answer appears only
/// once solved and the hint body only once unlocked.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClueSummary {
    /// Catalog id.
    pub clue_id: u8,
    /// Category of the clue.
    pub category: Category,
    /// Whether the clue has been solved.
    pub is_solved: bool,
    /// Canonical answer, present once solved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Who solved or revealed the clue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solved_by: Option<String>,
    /// RFC 3339 solve timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solved_at: Option<String>,
    /// Whether the hint has been purchased.
    pub hint_unlocked: bool,
    /// Hint body, present once unlocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<ClueRecordEntity> for ClueSummary {
    fn from(entity: ClueRecordEntity) -> Self {
        let hint = entity.hint_unlocked.then_some(entity.hint_text);
        Self {
            clue_id: entity.clue_id,
            category: entity.category,
            is_solved: entity.is_solved,
            answer: entity.revealed_answer,
            solved_by: entity.solved_by,
            solved_at: entity.solved_at.map(format_system_time),
            hint_unlocked: entity.hint_unlocked,
            hint,
        }
    }
}

/// The full clue board returned by the snapshot route.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClueBoard {
    /// Clue records in catalog order.
    pub clues: Vec<ClueSummary>,
}

/// One row of the live activity feed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GuessSummary {
    /// Stable identifier of the log entry.
    pub id: Uuid,
    /// Clue the guess targeted.
    pub clue_id: u8,
    /// Normalized guess text.
    pub guess: String,
    /// Whether the guess solved the clue.
    pub correct: bool,
    /// Display name of the submitting player.
    pub player_name: String,
    /// RFC 3339 submission timestamp.
    pub submitted_at: String,
}

impl From<GuessEntity> for GuessSummary {
    fn from(entity: GuessEntity) -> Self {
        Self {
            id: entity.id,
            clue_id: entity.clue_id,
            guess: entity.guess,
            correct: entity.correct,
            player_name: entity.player_name,
            submitted_at: format_system_time(entity.submitted_at),
        }
    }
}

/// The recent activity feed, newest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct GuessFeed {
    /// Most recent guesses, capped at the feed limit.
    pub guesses: Vec<GuessSummary>,
}
