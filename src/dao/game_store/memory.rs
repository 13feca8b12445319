//! In-memory [`GameStore`] backend.
//!
//! Backs the integration tests and storage-less local runs. Documents live
//! in concurrent maps; the guess log is a plain append vector per game.

use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::dao::{
    game_store::GameStore,
    models::{ClueRecordEntity, GameStateEntity, GuessEntity},
    storage::StorageResult,
};

/// Volatile store keeping the whole aggregate in process memory.
#[derive(Clone, Default)]
pub struct MemoryGameStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    games: DashMap<String, GameStateEntity>,
    clues: DashMap<(String, u8), ClueRecordEntity>,
    guesses: RwLock<Vec<(String, GuessEntity)>>,
}

impl MemoryGameStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryGameStore {
    fn find_game(
        &self,
        game_id: &str,
    ) -> BoxFuture<'static, StorageResult<Option<GameStateEntity>>> {
        let store = self.clone();
        let game_id = game_id.to_owned();
        Box::pin(async move {
            Ok(store
                .inner
                .games
                .get(&game_id)
                .map(|game| game.value().clone()))
        })
    }

    fn replace_game(&self, game: GameStateEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.inner.games.insert(game.id.clone(), game);
            Ok(())
        })
    }

    fn find_clue(
        &self,
        game_id: &str,
        clue_id: u8,
    ) -> BoxFuture<'static, StorageResult<Option<ClueRecordEntity>>> {
        let store = self.clone();
        let key = (game_id.to_owned(), clue_id);
        Box::pin(async move { Ok(store.inner.clues.get(&key).map(|clue| clue.value().clone())) })
    }

    fn replace_clue(
        &self,
        game_id: &str,
        clue: ClueRecordEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        let key = (game_id.to_owned(), clue.clue_id);
        Box::pin(async move {
            store.inner.clues.insert(key, clue);
            Ok(())
        })
    }

    fn list_clues(
        &self,
        game_id: &str,
    ) -> BoxFuture<'static, StorageResult<Vec<ClueRecordEntity>>> {
        let store = self.clone();
        let game_id = game_id.to_owned();
        Box::pin(async move {
            let mut clues: Vec<ClueRecordEntity> = store
                .inner
                .clues
                .iter()
                .filter(|entry| entry.key().0 == game_id)
                .map(|entry| entry.value().clone())
                .collect();
            clues.sort_by_key(|clue| clue.clue_id);
            Ok(clues)
        })
    }

    fn append_guess(
        &self,
        game_id: &str,
        guess: GuessEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        let game_id = game_id.to_owned();
        Box::pin(async move {
            store.inner.guesses.write().await.push((game_id, guess));
            Ok(())
        })
    }

    fn recent_guesses(
        &self,
        game_id: &str,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<GuessEntity>>> {
        let store = self.clone();
        let game_id = game_id.to_owned();
        Box::pin(async move {
            let log = store.inner.guesses.read().await;
            let recent = log
                .iter()
                .filter(|(id, _)| *id == game_id)
                .rev()
                .take(limit)
                .map(|(_, guess)| guess.clone())
                .collect();
            Ok(recent)
        })
    }

    fn provision_game(
        &self,
        game: GameStateEntity,
        clues: Vec<ClueRecordEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let game_id = game.id.clone();
            store
                .inner
                .clues
                .retain(|(id, _), _| *id != game_id);
            for clue in clues {
                store
                    .inner
                    .clues
                    .insert((game_id.clone(), clue.clue_id), clue);
            }
            store.inner.games.insert(game_id, game);
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
