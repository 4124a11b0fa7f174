use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with the backend health, probing the score storage.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.leaderboard().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "score storage health check failed");
            HealthResponse::degraded()
        }
    }
}
