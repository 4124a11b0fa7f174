use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::leaderboard::{HighScoreSummary, LeaderboardResponse, RecentScoresResponse},
    error::AppError,
    services::leaderboard_service,
    state::SharedState,
};

/// Routes exposing the score boards and records.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/leaderboards/{artist}", get(artist_scores))
        .route("/scores/recent", get(recent_scores))
        .route("/high-scores/{artist}", get(artist_high_score))
}

/// Top scores retained for an artist, highest first.
#[utoipa::path(
    get,
    path = "/leaderboards/{artist}",
    tag = "leaderboard",
    params(("artist" = String, Path, description = "Artist name, case-insensitive")),
    responses(
        (status = 200, description = "Artist leaderboard", body = LeaderboardResponse)
    )
)]
pub async fn artist_scores(
    State(state): State<SharedState>,
    Path(artist): Path<String>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let board = leaderboard_service::artist_scores(&state, &artist).await?;
    Ok(Json(board))
}

/// Scores across all artists, most recent first.
#[utoipa::path(
    get,
    path = "/scores/recent",
    tag = "leaderboard",
    responses(
        (status = 200, description = "Recent scores feed", body = RecentScoresResponse)
    )
)]
pub async fn recent_scores(
    State(state): State<SharedState>,
) -> Result<Json<RecentScoresResponse>, AppError> {
    let feed = leaderboard_service::recent_scores(&state).await?;
    Ok(Json(feed))
}

/// Last recorded score for an artist (last write, not best-ever).
#[utoipa::path(
    get,
    path = "/high-scores/{artist}",
    tag = "leaderboard",
    params(("artist" = String, Path, description = "Artist name, exact case")),
    responses(
        (status = 200, description = "Last recorded score", body = HighScoreSummary),
        (status = 404, description = "No score recorded for this artist")
    )
)]
pub async fn artist_high_score(
    State(state): State<SharedState>,
    Path(artist): Path<String>,
) -> Result<Json<HighScoreSummary>, AppError> {
    let record = leaderboard_service::artist_high_score(&state, &artist).await?;
    Ok(Json(record))
}
