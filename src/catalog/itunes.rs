//! Catalog backend talking to the iTunes Search API.

use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    catalog::{Artist, Catalog, CatalogError, CatalogResult},
    state::game::Track,
};

/// Maximum artists returned by a search.
const SEARCH_LIMIT: &str = "5";
/// Maximum songs requested per artist lookup.
const LOOKUP_LIMIT: &str = "25";

/// Catalog backed by the iTunes Search API.
///
/// Suggestion results are cached per lowercased query, so typing the same
/// prefix twice does not hit the network again.
#[derive(Clone)]
pub struct ItunesCatalog {
    client: Client,
    base_url: Arc<str>,
    suggestion_cache: Arc<DashMap<String, Vec<Artist>>>,
}

impl ItunesCatalog {
    /// Build a client against `base_url` (e.g. `https://itunes.apple.com`).
    pub fn new(base_url: &str) -> CatalogResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| CatalogError::request("building http client", source))?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            suggestion_cache: Arc::new(DashMap::new()),
        })
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> CatalogResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| CatalogError::request(format!("querying `{url}`"), source))?;

        match response.status() {
            StatusCode::OK => response
                .json::<T>()
                .await
                .map_err(|source| {
                    CatalogError::request(format!("decoding response from `{url}`"), source)
                }),
            other => Err(CatalogError::Status {
                status: other.as_u16(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<ResultItem>,
}

/// Loose projection of an iTunes result; search and lookup share the shape,
/// with different subsets of fields populated.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultItem {
    #[serde(default)]
    wrapper_type: Option<String>,
    #[serde(default)]
    artist_id: Option<u64>,
    #[serde(default)]
    artist_name: Option<String>,
    #[serde(default)]
    track_id: Option<u64>,
    #[serde(default)]
    track_name: Option<String>,
    #[serde(default)]
    preview_url: Option<String>,
}

fn artist_from(item: ResultItem) -> Option<Artist> {
    Some(Artist {
        id: item.artist_id?.to_string(),
        name: item.artist_name?,
    })
}

fn track_from(item: ResultItem, artist_id: &str) -> Option<Track> {
    if item.wrapper_type.as_deref() != Some("track") {
        return None;
    }
    Some(Track {
        id: item.track_id?.to_string(),
        name: item.track_name?,
        preview_url: item.preview_url?,
        artist_id: artist_id.to_owned(),
    })
}

impl Catalog for ItunesCatalog {
    fn find_artist(&self, name: &str) -> BoxFuture<'static, CatalogResult<Option<Artist>>> {
        let this = self.clone();
        let name = name.to_owned();
        Box::pin(async move {
            let response: SearchResponse = this
                .get_json(
                    "search",
                    &[
                        ("term", name.as_str()),
                        ("entity", "musicArtist"),
                        ("attribute", "artistTerm"),
                        ("limit", SEARCH_LIMIT),
                    ],
                )
                .await?;

            let artists: Vec<Artist> = response.results.into_iter().filter_map(artist_from).collect();
            let exact = artists
                .iter()
                .find(|artist| artist.name.eq_ignore_ascii_case(&name))
                .cloned();

            Ok(exact.or_else(|| artists.into_iter().next()))
        })
    }

    fn top_tracks(&self, artist_id: &str) -> BoxFuture<'static, CatalogResult<Vec<Track>>> {
        let this = self.clone();
        let artist_id = artist_id.to_owned();
        Box::pin(async move {
            let response: SearchResponse = this
                .get_json(
                    "lookup",
                    &[
                        ("id", artist_id.as_str()),
                        ("entity", "song"),
                        ("limit", LOOKUP_LIMIT),
                    ],
                )
                .await?;

            Ok(response
                .results
                .into_iter()
                .filter_map(|item| track_from(item, &artist_id))
                .collect())
        })
    }

    fn suggest_artists(&self, query: &str) -> BoxFuture<'static, CatalogResult<Vec<Artist>>> {
        let this = self.clone();
        let query = query.to_owned();
        Box::pin(async move {
            let cache_key = query.to_lowercase();
            if let Some(cached) = this.suggestion_cache.get(&cache_key) {
                return Ok(cached.clone());
            }

            let response: SearchResponse = this
                .get_json(
                    "search",
                    &[
                        ("term", query.as_str()),
                        ("entity", "musicArtist"),
                        ("limit", SEARCH_LIMIT),
                    ],
                )
                .await?;

            let suggestions: Vec<Artist> =
                response.results.into_iter().filter_map(artist_from).collect();
            this.suggestion_cache.insert(cache_key, suggestions.clone());

            Ok(suggestions)
        })
    }
}
