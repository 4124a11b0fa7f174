use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::dao::{
    leaderboard::format_time_ago,
    models::{HighScoreEntity, RecentScoreEntity, ScoreEntryEntity},
};

/// One row of an artist's leaderboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreSummary {
    /// Name the player saved the score under.
    pub player_name: String,
    /// Recorded final score.
    pub score: u32,
    /// RFC 3339 timestamp of the record.
    pub date: String,
}

impl From<ScoreEntryEntity> for ScoreSummary {
    fn from(entry: ScoreEntryEntity) -> Self {
        Self {
            player_name: entry.player_name,
            score: entry.score,
            date: entry.date,
        }
    }
}

/// Retained scores for one artist, highest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    /// Artist the board belongs to, as queried.
    pub artist: String,
    /// Scores, highest first, at most the retained maximum.
    pub scores: Vec<ScoreSummary>,
}

/// One row of the global recent-scores feed.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentScoreSummary {
    /// Name the player saved the score under.
    pub player_name: String,
    /// Artist the game was played against.
    pub artist_name: String,
    /// Recorded final score.
    pub score: u32,
    /// RFC 3339 timestamp of the record.
    pub date: String,
    /// Human label such as "just now" or "3h ago".
    pub time_ago: String,
}

impl RecentScoreSummary {
    /// Build a feed row, deriving the relative-time label against `now`.
    pub fn with_time_ago(entry: RecentScoreEntity, now: OffsetDateTime) -> Self {
        let time_ago = format_time_ago(&entry.date, now);
        Self {
            player_name: entry.player_name,
            artist_name: entry.artist_name,
            score: entry.score,
            date: entry.date,
            time_ago,
        }
    }
}

/// Scores across all artists, most recent first.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentScoresResponse {
    /// Feed rows, most recent first, at most the retained maximum.
    pub scores: Vec<RecentScoreSummary>,
}

/// Last recorded score for an artist.
#[derive(Debug, Serialize, ToSchema)]
pub struct HighScoreSummary {
    /// Score of the most recently finished game for the artist.
    pub score: u32,
    /// RFC 3339 timestamp of the record.
    pub date: String,
}

impl From<HighScoreEntity> for HighScoreSummary {
    fn from(record: HighScoreEntity) -> Self {
        Self {
            score: record.score,
            date: record.date,
        }
    }
}
