mod sse;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, RwLock, watch};

use crate::{
    config::{AppConfig, TokenPolicy},
    dao::game_store::GameStore,
    error::ServiceError,
};

pub use self::sse::SseHub;

/// Cheaply cloneable handle to the shared application state.
pub type SharedState = Arc<AppState>;

/// Central application state: the storage handle, the SSE hub, and the
/// per-game write gates.
///
/// The engine itself is stateless between requests; every operation
/// re-reads current documents from storage. The only cross-request pieces
/// kept here are infrastructure.
pub struct AppState {
    game_store: RwLock<Option<Arc<dyn GameStore>>>,
    sse: SseHub,
    degraded: watch::Sender<bool>,
    // One async mutex per game aggregate. Holding it across the
    // read-counters/write-counters window is what rules out the lost-update
    // anomaly between concurrent operations.
    aggregate_gates: DashMap<String, Arc<Mutex<()>>>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            game_store: RwLock::new(None),
            sse: SseHub::new(16),
            degraded: degraded_tx,
            aggregate_gates: DashMap::new(),
            config,
        })
    }

    /// Obtain a handle to the current game store, if one is installed.
    pub async fn game_store(&self) -> Option<Arc<dyn GameStore>> {
        let guard = self.game_store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the game store or fail with a degraded-mode error.
    pub async fn require_game_store(&self) -> Result<Arc<dyn GameStore>, ServiceError> {
        self.game_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new game store implementation and leave degraded mode.
    pub async fn set_game_store(&self, store: Arc<dyn GameStore>) {
        {
            let mut guard = self.game_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Remove the current game store and enter degraded mode.
    pub async fn clear_game_store(&self) {
        {
            let mut guard = self.game_store.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            let changed = *current != value;
            *current = value;
            changed
        });
    }

    /// Broadcast hub used for the public SSE stream.
    pub fn public_sse(&self) -> &SseHub {
        &self.sse
    }

    /// Serialization gate for one game aggregate. Every mutation operation
    /// locks this for its whole read-decide-write sequence.
    pub fn aggregate_gate(&self, game_id: &str) -> Arc<Mutex<()>> {
        self.aggregate_gates
            .entry(game_id.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// The active token-economy policy.
    pub fn token_policy(&self) -> TokenPolicy {
        self.config.token_policy()
    }
}
