use dashmap::DashMap;
use serde_json::Value;

use crate::dao::storage::StorageResult;

use super::KeyValueStore;

/// In-memory store used as a test double for the file-backed one.
#[derive(Default)]
pub struct MemoryStore {
    documents: DashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> StorageResult<Option<Value>> {
        Ok(self.documents.get(key).map(|entry| entry.value().clone()))
    }

    fn write(&self, key: &str, value: &Value) -> StorageResult<()> {
        self.documents.insert(key.to_owned(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.documents.remove(key);
        Ok(())
    }
}
