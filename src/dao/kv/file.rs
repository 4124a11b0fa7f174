use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::dao::storage::{StorageError, StorageResult};

use super::KeyValueStore;

/// Store keeping one JSON document per key in a directory on disk.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the backing directory, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| {
            StorageError::unavailable(
                format!("creating data directory `{}`", dir.display()),
                source,
            )
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> StorageResult<Option<Value>> {
        let path = self.path_for(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::unavailable(
                    format!("reading `{}`", path.display()),
                    source,
                ));
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Ok(Some(value)),
            Err(source) => Err(StorageError::Corrupted {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &Value) -> StorageResult<()> {
        let path = self.path_for(key);
        fs::write(&path, value.to_string()).map_err(|source| {
            StorageError::unavailable(format!("writing `{}`", path.display()), source)
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::unavailable(
                format!("removing `{}`", path.display()),
                source,
            )),
        }
    }
}
