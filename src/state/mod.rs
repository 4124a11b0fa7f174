//! Shared in-memory application state.

pub mod events;
pub mod game;
pub mod options;
pub mod scoring;

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::AbortHandle;

use crate::{
    catalog::Catalog,
    config::AppConfig,
    dao::{high_score::HighScoreVault, kv::KeyValueStore, leaderboard::LeaderboardVault},
    state::{events::EventHub, game::GameSession},
};

/// Cheaply clonable handle to the central application state.
pub type SharedState = Arc<AppState>;

/// Central application state holding the injected collaborators and the
/// single current game session.
///
/// Every collaborator (catalog, score vaults, event hub) is passed in at
/// construction time so tests can substitute doubles; nothing here is a
/// process-wide global.
pub struct AppState {
    config: AppConfig,
    catalog: Arc<dyn Catalog>,
    leaderboard: LeaderboardVault,
    high_scores: HighScoreVault,
    events: EventHub,
    current_game: RwLock<Option<GameSession>>,
    inflight_suggestion: Mutex<Option<AbortHandle>>,
}

impl AppState {
    /// Construct an [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(
        config: AppConfig,
        catalog: Arc<dyn Catalog>,
        store: Arc<dyn KeyValueStore>,
    ) -> SharedState {
        Arc::new(Self {
            leaderboard: LeaderboardVault::new(Arc::clone(&store)),
            high_scores: HighScoreVault::new(store),
            events: EventHub::new(16),
            current_game: RwLock::new(None),
            inflight_suggestion: Mutex::new(None),
            config,
            catalog,
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle to the music catalog collaborator.
    pub fn catalog(&self) -> Arc<dyn Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Per-artist leaderboards and the recent-scores feed.
    pub fn leaderboard(&self) -> &LeaderboardVault {
        &self.leaderboard
    }

    /// Last-recorded high score per artist.
    pub fn high_scores(&self) -> &HighScoreVault {
        &self.high_scores
    }

    /// Broadcast hub for the game SSE stream.
    pub fn game_events(&self) -> &EventHub {
        &self.events
    }

    /// Currently active game session, if any.
    pub fn current_game(&self) -> &RwLock<Option<GameSession>> {
        &self.current_game
    }

    /// Install the abort handle of the newest suggestion lookup, returning
    /// the superseded one so the caller can cancel it.
    pub async fn replace_inflight_suggestion(&self, handle: AbortHandle) -> Option<AbortHandle> {
        let mut guard = self.inflight_suggestion.lock().await;
        guard.replace(handle)
    }
}
