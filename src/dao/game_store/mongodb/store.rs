use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database,
    bson::doc,
    options::IndexOptions,
};
use tokio::sync::RwLock;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{MongoClueDocument, MongoGameDocument, MongoGuessDocument},
};
use crate::dao::{
    game_store::GameStore,
    models::{ClueRecordEntity, GameStateEntity, GuessEntity},
    storage::StorageResult,
};

const GAME_COLLECTION_NAME: &str = "games";
const CLUE_COLLECTION_NAME: &str = "clues";
const GUESS_COLLECTION_NAME: &str = "guesses";

/// MongoDB-backed [`GameStore`] holding a reconnectable client handle.
#[derive(Clone)]
pub struct MongoGameStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoGameStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        // One record per clue id within a game; lookups are always by pair.
        let clue_collection = database.collection::<MongoClueDocument>(CLUE_COLLECTION_NAME);
        let clue_index = mongodb::IndexModel::builder()
            .keys(doc! {"game_id": 1, "clue_id": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("clue_game_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();

        clue_collection
            .create_index(clue_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: CLUE_COLLECTION_NAME,
                index: "game_id,clue_id",
                source,
            })?;

        // The activity feed reads the newest entries; index matches the sort.
        let guess_collection = database.collection::<MongoGuessDocument>(GUESS_COLLECTION_NAME);
        let guess_index = mongodb::IndexModel::builder()
            .keys(doc! {"game_id": 1, "submitted_at": -1})
            .options(
                IndexOptions::builder()
                    .name(Some("guess_feed_idx".to_owned()))
                    .build(),
            )
            .build();

        guess_collection
            .create_index(guess_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: GUESS_COLLECTION_NAME,
                index: "game_id,submitted_at",
                source,
            })?;

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn game_collection(&self) -> Collection<MongoGameDocument> {
        self.database()
            .await
            .collection::<MongoGameDocument>(GAME_COLLECTION_NAME)
    }

    async fn clue_collection(&self) -> Collection<MongoClueDocument> {
        self.database()
            .await
            .collection::<MongoClueDocument>(CLUE_COLLECTION_NAME)
    }

    async fn guess_collection(&self) -> Collection<MongoGuessDocument> {
        self.database()
            .await
            .collection::<MongoGuessDocument>(GUESS_COLLECTION_NAME)
    }

    async fn find_game(&self, game_id: String) -> MongoResult<Option<GameStateEntity>> {
        let collection = self.game_collection().await;
        let document = collection
            .find_one(doc! {"_id": &game_id})
            .await
            .map_err(|source| MongoDaoError::GameAccess {
                id: game_id,
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn replace_game(&self, game: GameStateEntity) -> MongoResult<()> {
        let id = game.id.clone();
        let document: MongoGameDocument = game.into();
        let collection = self.game_collection().await;
        collection
            .replace_one(doc! {"_id": &id}, &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::GameAccess { id, source })?;
        Ok(())
    }

    async fn find_clue(
        &self,
        game_id: String,
        clue_id: u8,
    ) -> MongoResult<Option<ClueRecordEntity>> {
        let collection = self.clue_collection().await;
        let document = collection
            .find_one(doc! {"game_id": &game_id, "clue_id": i32::from(clue_id)})
            .await
            .map_err(|source| MongoDaoError::ClueAccess {
                game_id,
                clue_id,
                source,
            })?;
        Ok(document.map(Into::into))
    }

    async fn replace_clue(&self, game_id: String, clue: ClueRecordEntity) -> MongoResult<()> {
        let clue_id = clue.clue_id;
        let document = MongoClueDocument::from_entity(game_id.clone(), clue);
        let collection = self.clue_collection().await;
        collection
            .replace_one(
                doc! {"game_id": &game_id, "clue_id": i32::from(clue_id)},
                &document,
            )
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::ClueAccess {
                game_id,
                clue_id,
                source,
            })?;
        Ok(())
    }

    async fn list_clues(&self, game_id: String) -> MongoResult<Vec<ClueRecordEntity>> {
        let collection = self.clue_collection().await;
        let documents: Vec<MongoClueDocument> = collection
            .find(doc! {"game_id": &game_id})
            .sort(doc! {"clue_id": 1})
            .await
            .map_err(|source| MongoDaoError::ClueBatch {
                game_id: game_id.clone(),
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ClueBatch { game_id, source })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn append_guess(&self, game_id: String, guess: GuessEntity) -> MongoResult<()> {
        let document = MongoGuessDocument::from_entity(game_id.clone(), guess);
        let collection = self.guess_collection().await;
        collection
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::GuessAccess { game_id, source })?;
        Ok(())
    }

    async fn recent_guesses(&self, game_id: String, limit: usize) -> MongoResult<Vec<GuessEntity>> {
        let collection = self.guess_collection().await;
        let documents: Vec<MongoGuessDocument> = collection
            .find(doc! {"game_id": &game_id})
            .sort(doc! {"submitted_at": -1})
            .limit(limit as i64)
            .await
            .map_err(|source| MongoDaoError::GuessAccess {
                game_id: game_id.clone(),
                source,
            })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::GuessAccess { game_id, source })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn provision_game(
        &self,
        game: GameStateEntity,
        clues: Vec<ClueRecordEntity>,
    ) -> MongoResult<()> {
        let game_id = game.id.clone();

        // Drop stale clue records before inserting the fresh batch so a
        // re-provision cannot leave orphans behind.
        let clue_collection = self.clue_collection().await;
        clue_collection
            .delete_many(doc! {"game_id": &game_id})
            .await
            .map_err(|source| MongoDaoError::ClueBatch {
                game_id: game_id.clone(),
                source,
            })?;

        let documents: Vec<MongoClueDocument> = clues
            .into_iter()
            .map(|clue| MongoClueDocument::from_entity(game_id.clone(), clue))
            .collect();
        clue_collection
            .insert_many(&documents)
            .await
            .map_err(|source| MongoDaoError::ClueBatch {
                game_id: game_id.clone(),
                source,
            })?;

        self.replace_game(game).await
    }
}

impl GameStore for MongoGameStore {
    fn find_game(
        &self,
        game_id: &str,
    ) -> BoxFuture<'static, StorageResult<Option<GameStateEntity>>> {
        let store = self.clone();
        let game_id = game_id.to_owned();
        Box::pin(async move { store.find_game(game_id).await.map_err(Into::into) })
    }

    fn replace_game(&self, game: GameStateEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.replace_game(game).await.map_err(Into::into) })
    }

    fn find_clue(
        &self,
        game_id: &str,
        clue_id: u8,
    ) -> BoxFuture<'static, StorageResult<Option<ClueRecordEntity>>> {
        let store = self.clone();
        let game_id = game_id.to_owned();
        Box::pin(async move { store.find_clue(game_id, clue_id).await.map_err(Into::into) })
    }

    fn replace_clue(
        &self,
        game_id: &str,
        clue: ClueRecordEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        let game_id = game_id.to_owned();
        Box::pin(async move { store.replace_clue(game_id, clue).await.map_err(Into::into) })
    }

    fn list_clues(
        &self,
        game_id: &str,
    ) -> BoxFuture<'static, StorageResult<Vec<ClueRecordEntity>>> {
        let store = self.clone();
        let game_id = game_id.to_owned();
        Box::pin(async move { store.list_clues(game_id).await.map_err(Into::into) })
    }

    fn append_guess(
        &self,
        game_id: &str,
        guess: GuessEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        let game_id = game_id.to_owned();
        Box::pin(async move { store.append_guess(game_id, guess).await.map_err(Into::into) })
    }

    fn recent_guesses(
        &self,
        game_id: &str,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<GuessEntity>>> {
        let store = self.clone();
        let game_id = game_id.to_owned();
        Box::pin(async move {
            store
                .recent_guesses(game_id, limit)
                .await
                .map_err(Into::into)
        })
    }

    fn provision_game(
        &self,
        game: GameStateEntity,
        clues: Vec<ClueRecordEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.provision_game(game, clues).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
