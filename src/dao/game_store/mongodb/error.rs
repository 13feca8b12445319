use thiserror::Error;

use crate::dao::storage::StorageError;

/// Result alias for MongoDB data-access operations.
pub type MongoResult<T> = Result<T, MongoDaoError>;

/// Errors raised by the MongoDB backend, one variant per failing operation
/// so log lines identify what was being attempted.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The configured URI could not be parsed.
    #[error("invalid MongoDB URI `{uri}`")]
    InvalidUri {
        /// The rejected URI.
        uri: String,
        #[source]
        source: mongodb::error::Error,
    },
    /// The driver client could not be constructed.
    #[error("failed to construct MongoDB client")]
    ClientConstruction {
        #[source]
        source: mongodb::error::Error,
    },
    /// The initial connectivity ping kept failing.
    #[error("MongoDB did not answer the initial ping after {attempts} attempts")]
    InitialPing {
        /// Number of ping attempts made before giving up.
        attempts: u32,
        #[source]
        source: mongodb::error::Error,
    },
    /// Index creation failed.
    #[error("failed to ensure index `{index}` on `{collection}`")]
    EnsureIndex {
        /// Collection the index belongs to.
        collection: &'static str,
        /// Index name.
        index: &'static str,
        #[source]
        source: mongodb::error::Error,
    },
    /// Reading or writing the game document failed.
    #[error("failed to access game `{id}`")]
    GameAccess {
        /// Game identifier.
        id: String,
        #[source]
        source: mongodb::error::Error,
    },
    /// Reading or writing a clue record failed.
    #[error("failed to access clue `{clue_id}` of game `{game_id}`")]
    ClueAccess {
        /// Game identifier.
        game_id: String,
        /// Clue identifier.
        clue_id: u8,
        #[source]
        source: mongodb::error::Error,
    },
    /// A bulk operation over the clue records of a game failed.
    #[error("failed to access clue records of game `{game_id}`")]
    ClueBatch {
        /// Game identifier.
        game_id: String,
        #[source]
        source: mongodb::error::Error,
    },
    /// Appending or reading the guess log failed.
    #[error("failed to access guess log of game `{game_id}`")]
    GuessAccess {
        /// Game identifier.
        game_id: String,
        #[source]
        source: mongodb::error::Error,
    },
    /// Connectivity ping failed on an established connection.
    #[error("MongoDB health ping failed")]
    HealthPing {
        #[source]
        source: mongodb::error::Error,
    },
}

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        let message = err.to_string();
        StorageError::unavailable(message, err)
    }
}
