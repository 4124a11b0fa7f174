//! Artist suggestion lookups with latest-request-wins semantics.

use tracing::warn;

use crate::{
    dto::catalog::SuggestionsResponse,
    error::ServiceError,
    state::SharedState,
};

/// Queries shorter than this return nothing without hitting the catalog.
const MIN_QUERY_LENGTH: usize = 2;

/// Look up artist suggestions for a partial query.
///
/// The newest lookup supersedes any in-flight one: the superseded task is
/// aborted and its result discarded, so a fast typist never sees stale
/// suggestions win over fresher ones. Catalog failures degrade to an empty
/// list rather than an error.
pub async fn suggest_artists(
    state: &SharedState,
    query: &str,
) -> Result<SuggestionsResponse, ServiceError> {
    let query = query.trim().to_owned();
    if query.chars().count() < MIN_QUERY_LENGTH {
        return Ok(SuggestionsResponse {
            suggestions: Vec::new(),
        });
    }

    let catalog = state.catalog();
    let lookup = tokio::spawn(async move { catalog.suggest_artists(&query).await });

    if let Some(superseded) = state
        .replace_inflight_suggestion(lookup.abort_handle())
        .await
    {
        superseded.abort();
    }

    let suggestions = match lookup.await {
        Ok(Ok(artists)) => artists.into_iter().map(Into::into).collect(),
        Ok(Err(err)) => {
            warn!(error = %err, "suggestion lookup failed");
            Vec::new()
        }
        Err(err) if err.is_cancelled() => Vec::new(),
        Err(err) => {
            warn!(error = %err, "suggestion lookup task died");
            Vec::new()
        }
    };

    Ok(SuggestionsResponse { suggestions })
}
