//! Persisted score documents shared across the storage layer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One leaderboard entry retained for an artist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntryEntity {
    /// Display name the player entered when saving the score.
    pub player_name: String,
    /// Final score of the finished game.
    pub score: u32,
    /// RFC 3339 timestamp of when the score was recorded.
    pub date: String,
}

/// Entry of the global recent-scores feed, carrying the artist it was
/// played against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecentScoreEntity {
    /// Display name the player entered when saving the score.
    pub player_name: String,
    /// Artist the game was played against, as the player typed it.
    pub artist_name: String,
    /// Final score of the finished game.
    pub score: u32,
    /// RFC 3339 timestamp of when the score was recorded.
    pub date: String,
}

/// Last recorded score for an artist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreEntity {
    /// Score of the most recently finished game for the artist.
    pub score: u32,
    /// RFC 3339 timestamp of when the record was written.
    pub date: String,
}

/// Mapping of normalized (lowercased) artist key to its retained scores.
///
/// Insertion order of artists is preserved so the persisted document stays
/// stable across rewrites.
pub type LeaderboardsEntity = IndexMap<String, Vec<ScoreEntryEntity>>;

/// Mapping of exact (case-preserved) artist name to its high-score record.
pub type HighScoresEntity = IndexMap<String, HighScoreEntity>;
