//! Music-catalog collaborator resolving artists and their playable tracks.

pub mod fixture;
#[cfg(feature = "itunes-catalog")]
pub mod itunes;

use std::error::Error;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::state::game::Track;

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A musical artist as known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Error raised by catalog backends.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog could not be queried or its answer decoded.
    #[error("catalog request failed: {message}")]
    Request {
        /// Description of the operation that failed.
        message: String,
        /// Underlying transport or decoding failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The catalog answered with an unexpected HTTP status.
    #[error("catalog answered with status {status}")]
    Status {
        /// Status code of the rejected response.
        status: u16,
    },
}

impl CatalogError {
    /// Construct a request error from any backend failure.
    pub fn request(message: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        CatalogError::Request {
            message: message.into(),
            source: Box::new(source),
        }
    }
}

/// Abstraction over the music catalog consumed by the game.
///
/// Implementations are injected into [`crate::state::AppState`]; the game
/// core never talks to a concrete backend directly.
pub trait Catalog: Send + Sync {
    /// Resolve `name` to a single artist, preferring an exact match.
    fn find_artist(&self, name: &str) -> BoxFuture<'static, CatalogResult<Option<Artist>>>;
    /// Top playable tracks for `artist_id`; entries without a preview URL
    /// are dropped.
    fn top_tracks(&self, artist_id: &str) -> BoxFuture<'static, CatalogResult<Vec<Track>>>;
    /// Artist suggestions for a partial `query`.
    fn suggest_artists(&self, query: &str) -> BoxFuture<'static, CatalogResult<Vec<Artist>>>;
}
