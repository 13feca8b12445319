use indexmap::IndexMap;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    clues::Category,
    dao::models::{CategoryStatsEntity, ClueRecordEntity, GameStateEntity, GuessEntity},
};

/// Wire shape of the singleton game document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoGameDocument {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    start_time: DateTime,
    end_time: DateTime,
    total_solved: u32,
    tokens: i64,
    tokens_spent: u32,
    category_stats: IndexMap<Category, CategoryStatsEntity>,
    completed_categories: Vec<Category>,
    previous_milestone_solved: u32,
}

impl From<GameStateEntity> for MongoGameDocument {
    fn from(value: GameStateEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            start_time: DateTime::from_system_time(value.start_time),
            end_time: DateTime::from_system_time(value.end_time),
            total_solved: value.total_solved,
            tokens: value.tokens,
            tokens_spent: value.tokens_spent,
            category_stats: value.category_stats,
            completed_categories: value.completed_categories,
            previous_milestone_solved: value.previous_milestone_solved,
        }
    }
}

impl From<MongoGameDocument> for GameStateEntity {
    fn from(value: MongoGameDocument) -> Self {
        Self {
            id: value.id,
            title: value.title,
            start_time: value.start_time.to_system_time(),
            end_time: value.end_time.to_system_time(),
            total_solved: value.total_solved,
            tokens: value.tokens,
            tokens_spent: value.tokens_spent,
            category_stats: value.category_stats,
            completed_categories: value.completed_categories,
            previous_milestone_solved: value.previous_milestone_solved,
        }
    }
}

/// Wire shape of one clue record, keyed by `(game_id, clue_id)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoClueDocument {
    game_id: String,
    clue_id: u8,
    category: Category,
    is_solved: bool,
    revealed_answer: Option<String>,
    solved_by: Option<String>,
    solved_at: Option<DateTime>,
    hint_unlocked: bool,
    hint_text: String,
}

impl MongoClueDocument {
    pub(super) fn from_entity(game_id: String, value: ClueRecordEntity) -> Self {
        Self {
            game_id,
            clue_id: value.clue_id,
            category: value.category,
            is_solved: value.is_solved,
            revealed_answer: value.revealed_answer,
            solved_by: value.solved_by,
            solved_at: value.solved_at.map(DateTime::from_system_time),
            hint_unlocked: value.hint_unlocked,
            hint_text: value.hint_text,
        }
    }
}

impl From<MongoClueDocument> for ClueRecordEntity {
    fn from(value: MongoClueDocument) -> Self {
        Self {
            clue_id: value.clue_id,
            category: value.category,
            is_solved: value.is_solved,
            revealed_answer: value.revealed_answer,
            solved_by: value.solved_by,
            solved_at: value.solved_at.map(|at| at.to_system_time()),
            hint_unlocked: value.hint_unlocked,
            hint_text: value.hint_text,
        }
    }
}

/// Wire shape of one guess log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoGuessDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    game_id: String,
    clue_id: u8,
    guess: String,
    correct: bool,
    player_name: String,
    submitted_at: DateTime,
}

impl MongoGuessDocument {
    pub(super) fn from_entity(game_id: String, value: GuessEntity) -> Self {
        Self {
            id: value.id,
            game_id,
            clue_id: value.clue_id,
            guess: value.guess,
            correct: value.correct,
            player_name: value.player_name,
            submitted_at: DateTime::from_system_time(value.submitted_at),
        }
    }
}

impl From<MongoGuessDocument> for GuessEntity {
    fn from(value: MongoGuessDocument) -> Self {
        Self {
            id: value.id,
            clue_id: value.clue_id,
            guess: value.guess,
            correct: value.correct,
            player_name: value.player_name,
            submitted_at: value.submitted_at.to_system_time(),
        }
    }
}
