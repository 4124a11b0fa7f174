//! Persistence layer: key/value backends and the score vaults built on them.

pub mod high_score;
pub mod kv;
pub mod leaderboard;
pub mod models;
pub mod storage;

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::dao::{
    kv::KeyValueStore,
    storage::{StorageError, StorageResult},
};

/// Load the document under `key`, falling back to the empty value when the
/// document is missing or unreadable.
///
/// Malformed stored data is recovered by resetting to the initial value:
/// logged, never fatal. Backend unavailability still propagates.
fn load_or_reset<T>(store: &dyn KeyValueStore, key: &str) -> StorageResult<T>
where
    T: DeserializeOwned + Default,
{
    match store.read(key) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(parsed) => Ok(parsed),
            Err(err) => {
                warn!(key, error = %err, "stored document does not match the expected layout; resetting");
                Ok(T::default())
            }
        },
        Ok(None) => Ok(T::default()),
        Err(StorageError::Corrupted { key, source }) => {
            warn!(key = %key, error = %source, "stored document is not valid JSON; resetting");
            Ok(T::default())
        }
        Err(err) => Err(err),
    }
}

/// Serialise `value` and write it under `key`.
fn persist<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> StorageResult<()>
where
    T: Serialize,
{
    let document = serde_json::to_value(value)
        .map_err(|source| StorageError::unavailable(format!("encoding `{key}`"), source))?;
    store.write(key, &document)
}
