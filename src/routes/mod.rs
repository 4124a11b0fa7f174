use axum::Router;

use crate::state::SharedState;

pub mod catalog;
pub mod docs;
pub mod game;
pub mod health;
pub mod leaderboard;
pub mod sse;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(game::router())
        .merge(leaderboard::router())
        .merge(catalog::router())
        .merge(sse::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
