use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::Artist;

/// Artist suggestion row for the search box.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistSuggestion {
    /// Catalog identifier of the artist.
    pub id: String,
    /// Display name of the artist.
    pub name: String,
}

impl From<Artist> for ArtistSuggestion {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
        }
    }
}

/// List of suggestions matching a partial query.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionsResponse {
    /// Matching artists, best first, possibly empty.
    pub suggestions: Vec<ArtistSuggestion>,
}
