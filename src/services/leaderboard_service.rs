//! Read-only projections over the score vaults.

use time::OffsetDateTime;

use crate::{
    dto::leaderboard::{
        HighScoreSummary, LeaderboardResponse, RecentScoreSummary, RecentScoresResponse,
    },
    error::ServiceError,
    state::SharedState,
};

/// Top scores retained for `artist_name`, highest first.
pub async fn artist_scores(
    state: &SharedState,
    artist_name: &str,
) -> Result<LeaderboardResponse, ServiceError> {
    let scores = state.leaderboard().artist_scores(artist_name).await?;
    Ok(LeaderboardResponse {
        artist: artist_name.to_owned(),
        scores: scores.into_iter().map(Into::into).collect(),
    })
}

/// Scores across all artists, most recent first, with relative-time labels.
pub async fn recent_scores(state: &SharedState) -> Result<RecentScoresResponse, ServiceError> {
    let entries = state.leaderboard().recent_scores().await?;
    let now = OffsetDateTime::now_utc();
    Ok(RecentScoresResponse {
        scores: entries
            .into_iter()
            .map(|entry| RecentScoreSummary::with_time_ago(entry, now))
            .collect(),
    })
}

/// Last recorded score for `artist_name`.
pub async fn artist_high_score(
    state: &SharedState,
    artist_name: &str,
) -> Result<HighScoreSummary, ServiceError> {
    let record = state
        .high_scores()
        .artist_high_score(artist_name)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("no high score recorded for `{artist_name}`"))
        })?;

    Ok(record.into())
}
