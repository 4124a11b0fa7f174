//! Error type shared by the key/value storage backends.

use std::error::Error;

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be read or written at all.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Description of the operation that failed.
        message: String,
        /// Underlying backend failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A stored document exists but is not valid JSON.
    #[error("stored document `{key}` is corrupted")]
    Corrupted {
        /// Key of the unreadable document.
        key: String,
        /// Parse failure reported by the decoder.
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
