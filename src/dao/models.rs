use std::time::SystemTime;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clues::{self, Category};

/// Identifier of the singleton game aggregate. There is exactly one live
/// game; every clue record and guess entry hangs off this document.
pub const GAME_ID: &str = "main";

/// Per-category solve counters tracked on the game document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStatsEntity {
    /// Number of clues in the category (fixed at provisioning).
    pub total: u32,
    /// Number of those clues solved so far.
    pub solved: u32,
}

/// The shared game-state document persisted by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateEntity {
    /// Primary key, always [`GAME_ID`].
    pub id: String,
    /// Display title shown in the UI header.
    pub title: String,
    /// Operator-supplied game start.
    pub start_time: SystemTime,
    /// Operator-supplied game end.
    pub end_time: SystemTime,
    /// Cumulative solves across all categories.
    pub total_solved: u32,
    /// Spendable token balance. No floor: wrong guesses and purchases may
    /// drive it negative unless the minimum-balance policy is enabled.
    pub tokens: i64,
    /// Tokens spent on hints and reveals, for the payments panel.
    pub tokens_spent: u32,
    /// Solve counters per category, in [`Category::ALL`] order.
    pub category_stats: IndexMap<Category, CategoryStatsEntity>,
    /// Categories that have already paid out their completion bonus. Once
    /// entered, never removed.
    pub completed_categories: Vec<Category>,
    /// `total_solved` value at the last milestone payout. Watermark that
    /// keeps repeated award recomputation from paying the same milestone
    /// twice.
    pub previous_milestone_solved: u32,
}

impl GameStateEntity {
    /// Build a freshly provisioned game with zeroed counters and category
    /// totals taken from the static catalog.
    pub fn new(title: String, start_time: SystemTime, end_time: SystemTime) -> Self {
        let category_stats = clues::category_totals()
            .into_iter()
            .map(|(category, total)| (category, CategoryStatsEntity { total, solved: 0 }))
            .collect();

        Self {
            id: GAME_ID.to_owned(),
            title,
            start_time,
            end_time,
            total_solved: 0,
            tokens: 0,
            tokens_spent: 0,
            category_stats,
            completed_categories: Vec::new(),
            previous_milestone_solved: 0,
        }
    }
}

/// One persisted clue record, child of the game document. Created once at
/// provisioning; the unsolved→solved transition is one-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClueRecordEntity {
    /// Catalog id in `1..=50`.
    pub clue_id: u8,
    /// Category mirrored from the catalog at provisioning. Advisory: the
    /// catalog stays authoritative for counter increments.
    pub category: Category,
    /// Whether the clue has been solved or revealed.
    pub is_solved: bool,
    /// Canonical answer, populated only once solved.
    pub revealed_answer: Option<String>,
    /// Display name of whoever solved or revealed the clue.
    pub solved_by: Option<String>,
    /// Server-assigned solve timestamp.
    pub solved_at: Option<SystemTime>,
    /// Whether the hint has been purchased.
    pub hint_unlocked: bool,
    /// Hint body, shown once unlocked.
    pub hint_text: String,
}

impl ClueRecordEntity {
    /// Build the provisioning-time record for a catalog entry.
    pub fn fresh(clue_id: u8, category: Category, hint_text: String) -> Self {
        Self {
            clue_id,
            category,
            is_solved: false,
            revealed_answer: None,
            solved_by: None,
            solved_at: None,
            hint_unlocked: false,
            hint_text,
        }
    }
}

/// Append-only guess log entry, child of the game document. Immutable once
/// written; only read back for the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessEntity {
    /// Stable identifier for the entry.
    pub id: Uuid,
    /// Clue the guess targeted.
    pub clue_id: u8,
    /// Normalized guess text (trimmed, lowercase).
    pub guess: String,
    /// Whether the guess solved the clue. Forced `false` when the clue was
    /// already solved at submission time.
    pub correct: bool,
    /// Free-text display name of the submitting player.
    pub player_name: String,
    /// Server-assigned submission timestamp.
    pub submitted_at: SystemTime,
}
