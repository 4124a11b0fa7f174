//! Offline catalog with a small baked-in artist roster.
//!
//! Used as the backend when the `itunes-catalog` feature is disabled and as
//! the test double for the service layer.

use futures::future::BoxFuture;

use crate::{
    catalog::{Artist, Catalog, CatalogResult},
    state::game::Track,
};

/// Catalog serving a fixed set of artists and tracks from memory.
pub struct FixtureCatalog {
    artists: Vec<Artist>,
    tracks: Vec<Track>,
}

impl FixtureCatalog {
    /// Build a catalog from explicit data.
    pub fn new(artists: Vec<Artist>, tracks: Vec<Track>) -> Self {
        Self { artists, tracks }
    }
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        let artist = |id: &str, name: &str| Artist {
            id: id.to_owned(),
            name: name.to_owned(),
        };
        let track = |id: &str, name: &str, artist_id: &str| Track {
            id: id.to_owned(),
            name: name.to_owned(),
            preview_url: format!("https://previews.example/{id}.m4a"),
            artist_id: artist_id.to_owned(),
        };

        Self::new(
            vec![
                artist("ts", "Taylor Swift"),
                artist("dr", "Drake"),
                artist("es", "Ed Sheeran"),
            ],
            vec![
                track("ts-1", "Anti-Hero", "ts"),
                track("ts-2", "Cruel Summer", "ts"),
                track("ts-3", "Blank Space", "ts"),
                track("ts-4", "Shake It Off", "ts"),
                track("ts-5", "Love Story", "ts"),
                track("dr-1", "God's Plan", "dr"),
                track("dr-2", "Hotline Bling", "dr"),
                track("dr-3", "Nice For What", "dr"),
                track("es-1", "Shape of You", "es"),
                track("es-2", "Perfect", "es"),
                track("es-3", "Thinking Out Loud", "es"),
            ],
        )
    }
}

impl Catalog for FixtureCatalog {
    fn find_artist(&self, name: &str) -> BoxFuture<'static, CatalogResult<Option<Artist>>> {
        let needle = name.to_lowercase();
        let exact = self
            .artists
            .iter()
            .find(|artist| artist.name.to_lowercase() == needle)
            .cloned();
        // Flexible fallback: either name contains the other.
        let found = exact.or_else(|| {
            self.artists
                .iter()
                .find(|artist| {
                    let candidate = artist.name.to_lowercase();
                    candidate.contains(&needle) || needle.contains(&candidate)
                })
                .cloned()
        });

        Box::pin(async move { Ok(found) })
    }

    fn top_tracks(&self, artist_id: &str) -> BoxFuture<'static, CatalogResult<Vec<Track>>> {
        let tracks: Vec<Track> = self
            .tracks
            .iter()
            .filter(|track| track.artist_id == artist_id)
            .cloned()
            .collect();

        Box::pin(async move { Ok(tracks) })
    }

    fn suggest_artists(&self, query: &str) -> BoxFuture<'static, CatalogResult<Vec<Artist>>> {
        let needle = query.to_lowercase();
        let suggestions: Vec<Artist> = self
            .artists
            .iter()
            .filter(|artist| artist.name.to_lowercase().contains(&needle))
            .take(5)
            .cloned()
            .collect();

        Box::pin(async move { Ok(suggestions) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn exact_name_match_wins_over_containment() {
        let catalog = FixtureCatalog::default();
        let artist = catalog.find_artist("drake").await.unwrap().unwrap();
        assert_eq!(artist.name, "Drake");
    }

    #[tokio::test]
    async fn partial_name_still_resolves() {
        let catalog = FixtureCatalog::default();
        let artist = catalog.find_artist("taylor").await.unwrap().unwrap();
        assert_eq!(artist.name, "Taylor Swift");
    }

    #[tokio::test]
    async fn unknown_artist_resolves_to_none() {
        let catalog = FixtureCatalog::default();
        assert!(catalog.find_artist("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn tracks_are_scoped_to_the_artist() {
        let catalog = FixtureCatalog::default();
        let tracks = catalog.top_tracks("dr").await.unwrap();
        assert_eq!(tracks.len(), 3);
        assert!(tracks.iter().all(|t| t.artist_id == "dr"));
    }

    #[tokio::test]
    async fn suggestions_filter_by_substring() {
        let catalog = FixtureCatalog::default();
        let suggestions = catalog.suggest_artists("e").await.unwrap();
        assert!(suggestions.iter().any(|a| a.name == "Ed Sheeran"));
        assert!(suggestions.iter().any(|a| a.name == "Drake"));
    }
}
