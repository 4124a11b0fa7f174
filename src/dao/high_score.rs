//! Last-recorded high score per artist.

use std::sync::Arc;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::sync::Mutex;

use crate::dao::{
    kv::KeyValueStore,
    models::{HighScoreEntity, HighScoresEntity},
    storage::StorageResult,
};

use super::{load_or_reset, persist};

const HIGH_SCORES_KEY: &str = "guessTheSong_highScores";

/// Vault keeping one record per artist for "beat your previous score"
/// comparisons.
///
/// The record is last-write, not best-of: every finished game replaces the
/// previous entry for its artist, even with a lower score. The key is the
/// exact artist name, case preserved.
pub struct HighScoreVault {
    store: Arc<dyn KeyValueStore>,
    write_gate: Mutex<()>,
}

impl HighScoreVault {
    /// Build a vault over the given store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_gate: Mutex::new(()),
        }
    }

    /// Unconditionally replace the record for `artist_name` with `score`
    /// and the current timestamp.
    pub async fn save_high_score(&self, artist_name: &str, score: u32) -> StorageResult<()> {
        let _gate = self.write_gate.lock().await;

        let mut records: HighScoresEntity = load_or_reset(self.store.as_ref(), HIGH_SCORES_KEY)?;
        records.insert(
            artist_name.to_owned(),
            HighScoreEntity {
                score,
                date: OffsetDateTime::now_utc()
                    .format(&Rfc3339)
                    .unwrap_or_else(|_| "invalid-timestamp".into()),
            },
        );

        persist(self.store.as_ref(), HIGH_SCORES_KEY, &records)
    }

    /// Last recorded score for `artist_name`, if any.
    pub async fn artist_high_score(
        &self,
        artist_name: &str,
    ) -> StorageResult<Option<HighScoreEntity>> {
        let records: HighScoresEntity = load_or_reset(self.store.as_ref(), HIGH_SCORES_KEY)?;
        Ok(records.get(artist_name).cloned())
    }
}
