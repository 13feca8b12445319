pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use futures::future::BoxFuture;

use crate::dao::models::{ClueRecordEntity, GameStateEntity, GuessEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for the game aggregate: the
/// singleton game document plus its clue-record and guess-log children.
///
/// Append and replace operations are plain last-writer-wins document writes;
/// isolation for read-modify-write sequences is provided above this seam by
/// the per-game gate, not by the backend.
pub trait GameStore: Send + Sync {
    /// Fetch the game document, `None` when not yet provisioned.
    fn find_game(&self, game_id: &str) -> BoxFuture<'static, StorageResult<Option<GameStateEntity>>>;
    /// Replace the game document with the provided payload.
    fn replace_game(&self, game: GameStateEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch a single clue record by catalog id.
    fn find_clue(
        &self,
        game_id: &str,
        clue_id: u8,
    ) -> BoxFuture<'static, StorageResult<Option<ClueRecordEntity>>>;
    /// Replace a clue record with the provided payload.
    fn replace_clue(
        &self,
        game_id: &str,
        clue: ClueRecordEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// List every clue record of the game, ordered by catalog id.
    fn list_clues(&self, game_id: &str)
    -> BoxFuture<'static, StorageResult<Vec<ClueRecordEntity>>>;
    /// Append one guess log entry.
    fn append_guess(
        &self,
        game_id: &str,
        guess: GuessEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Most recent guess entries, newest first, capped at `limit`.
    fn recent_guesses(
        &self,
        game_id: &str,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<GuessEntity>>>;
    /// Provision the game document and its clue records in one batch,
    /// replacing any previous aggregate with the same id.
    fn provision_game(
        &self,
        game: GameStateEntity,
        clues: Vec<ClueRecordEntity>,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Cheap connectivity probe used by the storage supervisor.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish a dropped backend connection.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
