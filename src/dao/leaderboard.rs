//! Per-artist leaderboards and the global recent-scores feed.

use std::sync::Arc;

use time::{
    OffsetDateTime, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};
use tokio::sync::Mutex;

use crate::dao::{
    kv::KeyValueStore,
    models::{LeaderboardsEntity, RecentScoreEntity, ScoreEntryEntity},
    storage::StorageResult,
};

use super::{load_or_reset, persist};

const LEADERBOARDS_KEY: &str = "artistLeaderboards";
const RECENT_SCORES_KEY: &str = "recentScores";

/// Scores retained per artist; a rank beyond this means "not placed".
pub const MAX_ARTIST_ENTRIES: usize = 10;
/// Entries retained in the global recent-scores feed.
const MAX_RECENT_ENTRIES: usize = 10;

/// Format used for entries older than a week.
const ABSOLUTE_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// Vault maintaining the bounded top-K leaderboard of each artist plus a
/// recency-ordered feed of scores across all artists.
///
/// Every mutation is a synchronous read-modify-write over the injected
/// store, serialised through an internal lock so no writer observes a
/// half-applied cycle.
pub struct LeaderboardVault {
    store: Arc<dyn KeyValueStore>,
    write_gate: Mutex<()>,
}

impl LeaderboardVault {
    /// Build a vault over the given store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_gate: Mutex::new(()),
        }
    }

    /// Record `score` for `artist_name`, returning the 1-based rank of the
    /// new entry within that artist's board.
    ///
    /// The artist key is the lowercased name. Entries sort descending by
    /// score; equal scores keep insertion order, so the earlier entry ranks
    /// higher. Only the top [`MAX_ARTIST_ENTRIES`] survive; a returned rank
    /// beyond that means the entry did not make the board, and the stored
    /// top list is unchanged by it.
    pub async fn add_score(
        &self,
        artist_name: &str,
        score: u32,
        player_name: &str,
    ) -> StorageResult<usize> {
        let _gate = self.write_gate.lock().await;
        let recorded_at = now_rfc3339();

        let mut boards: LeaderboardsEntity = load_or_reset(self.store.as_ref(), LEADERBOARDS_KEY)?;
        let entries = boards.entry(artist_name.to_lowercase()).or_default();

        entries.push(ScoreEntryEntity {
            player_name: player_name.to_owned(),
            score,
            date: recorded_at.clone(),
        });
        let inserted = entries.len() - 1;

        let mut order: Vec<usize> = (0..entries.len()).collect();
        // Stable sort keeps earlier insertions ahead on equal scores.
        order.sort_by(|&a, &b| entries[b].score.cmp(&entries[a].score));
        let rank = order
            .iter()
            .position(|&index| index == inserted)
            .map(|position| position + 1)
            .unwrap_or(entries.len());

        let retained: Vec<ScoreEntryEntity> = order
            .into_iter()
            .take(MAX_ARTIST_ENTRIES)
            .map(|index| entries[index].clone())
            .collect();
        *entries = retained;

        persist(self.store.as_ref(), LEADERBOARDS_KEY, &boards)?;

        let mut recent: Vec<RecentScoreEntity> =
            load_or_reset(self.store.as_ref(), RECENT_SCORES_KEY)?;
        recent.insert(
            0,
            RecentScoreEntity {
                player_name: player_name.to_owned(),
                artist_name: artist_name.to_owned(),
                score,
                date: recorded_at,
            },
        );
        recent.truncate(MAX_RECENT_ENTRIES);
        persist(self.store.as_ref(), RECENT_SCORES_KEY, &recent)?;

        Ok(rank)
    }

    /// Retained scores for `artist_name`, highest first.
    pub async fn artist_scores(&self, artist_name: &str) -> StorageResult<Vec<ScoreEntryEntity>> {
        let boards: LeaderboardsEntity = load_or_reset(self.store.as_ref(), LEADERBOARDS_KEY)?;
        Ok(boards
            .get(&artist_name.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }

    /// Scores across all artists, most recent first.
    pub async fn recent_scores(&self) -> StorageResult<Vec<RecentScoreEntity>> {
        load_or_reset(self.store.as_ref(), RECENT_SCORES_KEY)
    }

    /// Drop both persisted documents.
    pub async fn clear(&self) -> StorageResult<()> {
        let _gate = self.write_gate.lock().await;
        self.store.remove(LEADERBOARDS_KEY)?;
        self.store.remove(RECENT_SCORES_KEY)
    }

    /// Probe the backing store.
    pub async fn health_check(&self) -> StorageResult<()> {
        self.store.read(LEADERBOARDS_KEY).map(|_| ())
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}

/// Human label describing how long ago `date` (RFC 3339) happened,
/// relative to `now`.
///
/// Unparseable dates come back verbatim so a damaged entry still renders.
pub fn format_time_ago(date: &str, now: OffsetDateTime) -> String {
    let Ok(parsed) = OffsetDateTime::parse(date, &Rfc3339) else {
        return date.to_owned();
    };

    let seconds = (now - parsed).whole_seconds();
    if seconds < 60 {
        return "just now".to_owned();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days}d ago");
    }

    parsed
        .format(&ABSOLUTE_DATE)
        .unwrap_or_else(|_| date.to_owned())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::Duration;

    use crate::dao::kv::MemoryStore;

    use super::*;

    fn vault() -> LeaderboardVault {
        LeaderboardVault::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn scores_are_ranked_descending() {
        let vault = vault();
        assert_eq!(vault.add_score("Queen", 40, "alice").await.unwrap(), 1);
        assert_eq!(vault.add_score("Queen", 90, "bob").await.unwrap(), 1);
        assert_eq!(vault.add_score("Queen", 70, "carol").await.unwrap(), 2);

        let scores = vault.artist_scores("Queen").await.unwrap();
        let by_player: Vec<&str> = scores.iter().map(|s| s.player_name.as_str()).collect();
        assert_eq!(by_player, ["bob", "carol", "alice"]);
    }

    #[tokio::test]
    async fn artist_key_is_case_insensitive() {
        let vault = vault();
        vault.add_score("Drake", 50, "alice").await.unwrap();
        let scores = vault.artist_scores("dRaKe").await.unwrap();
        assert_eq!(scores.len(), 1);
    }

    #[tokio::test]
    async fn equal_scores_keep_insertion_order() {
        let vault = vault();
        vault.add_score("Queen", 50, "first").await.unwrap();
        assert_eq!(vault.add_score("Queen", 50, "second").await.unwrap(), 2);

        let scores = vault.artist_scores("Queen").await.unwrap();
        assert_eq!(scores[0].player_name, "first");
        assert_eq!(scores[1].player_name, "second");
    }

    #[tokio::test]
    async fn board_is_truncated_to_the_top_ten() {
        let vault = vault();
        for i in 0..11u32 {
            vault
                .add_score("Queen", 100 + i, &format!("p{i}"))
                .await
                .unwrap();
        }

        let scores = vault.artist_scores("Queen").await.unwrap();
        assert_eq!(scores.len(), 10);
        assert_eq!(scores[0].score, 110);
        assert_eq!(scores[9].score, 101, "lowest score fell off");
    }

    #[tokio::test]
    async fn too_low_score_is_not_placed_and_leaves_the_board_unchanged() {
        let vault = vault();
        for i in 0..10u32 {
            vault
                .add_score("Queen", 100 + i, &format!("p{i}"))
                .await
                .unwrap();
        }
        let before = vault.artist_scores("Queen").await.unwrap();

        let rank = vault.add_score("Queen", 5, "loser").await.unwrap();
        assert!(rank > MAX_ARTIST_ENTRIES, "rank {rank} means not placed");
        assert_eq!(vault.artist_scores("Queen").await.unwrap(), before);
    }

    #[tokio::test]
    async fn beating_a_board_of_ties_evicts_the_newest_tie() {
        let vault = vault();
        for i in 0..10u32 {
            vault
                .add_score("Drake", 50, &format!("p{i}"))
                .await
                .unwrap();
        }

        let rank = vault.add_score("Drake", 60, "winner").await.unwrap();
        assert_eq!(rank, 1);

        let scores = vault.artist_scores("Drake").await.unwrap();
        assert_eq!(scores.len(), 10);
        assert_eq!(scores[0].player_name, "winner");
        assert!(
            !scores.iter().any(|s| s.player_name == "p9"),
            "latest tied entry fell off"
        );
    }

    #[tokio::test]
    async fn recent_feed_is_most_recent_first_across_artists() {
        let vault = vault();
        vault.add_score("Queen", 10, "alice").await.unwrap();
        vault.add_score("Drake", 20, "bob").await.unwrap();

        let recent = vault.recent_scores().await.unwrap();
        assert_eq!(recent[0].artist_name, "Drake");
        assert_eq!(recent[1].artist_name, "Queen");
    }

    #[tokio::test]
    async fn recent_feed_is_bounded() {
        let vault = vault();
        for i in 0..15u32 {
            vault
                .add_score("Queen", i, &format!("p{i}"))
                .await
                .unwrap();
        }
        assert_eq!(vault.recent_scores().await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn reads_are_idempotent() {
        let vault = vault();
        vault.add_score("Queen", 77, "alice").await.unwrap();

        assert_eq!(
            vault.artist_scores("Queen").await.unwrap(),
            vault.artist_scores("Queen").await.unwrap()
        );
        assert_eq!(
            vault.recent_scores().await.unwrap(),
            vault.recent_scores().await.unwrap()
        );
    }

    #[tokio::test]
    async fn malformed_document_resets_to_empty() {
        let store = Arc::new(MemoryStore::new());
        store
            .write(LEADERBOARDS_KEY, &json!(["not", "a", "mapping"]))
            .unwrap();

        let vault = LeaderboardVault::new(store);
        assert!(vault.artist_scores("Queen").await.unwrap().is_empty());
        assert_eq!(vault.add_score("Queen", 30, "alice").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn clear_drops_both_documents() {
        let vault = vault();
        vault.add_score("Queen", 10, "alice").await.unwrap();
        vault.clear().await.unwrap();
        assert!(vault.artist_scores("Queen").await.unwrap().is_empty());
        assert!(vault.recent_scores().await.unwrap().is_empty());
    }

    #[test]
    fn time_ago_labels_follow_the_age_brackets() {
        let now = OffsetDateTime::now_utc();
        let stamp = |ago: Duration| (now - ago).format(&Rfc3339).unwrap();

        assert_eq!(format_time_ago(&stamp(Duration::seconds(30)), now), "just now");
        assert_eq!(format_time_ago(&stamp(Duration::minutes(5)), now), "5m ago");
        assert_eq!(format_time_ago(&stamp(Duration::hours(3)), now), "3h ago");
        assert_eq!(format_time_ago(&stamp(Duration::days(2)), now), "2d ago");
    }

    #[test]
    fn old_entries_get_an_absolute_date() {
        let now = OffsetDateTime::now_utc();
        let stamp = (now - Duration::days(30)).format(&Rfc3339).unwrap();
        let label = format_time_ago(&stamp, now);
        assert!(label.contains(','), "absolute date expected, got {label}");
    }

    #[test]
    fn unparseable_date_is_returned_verbatim() {
        let now = OffsetDateTime::now_utc();
        assert_eq!(format_time_ago("not-a-date", now), "not-a-date");
    }
}
