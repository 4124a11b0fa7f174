use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    dto::catalog::SuggestionsResponse, error::AppError, services::suggestion_service,
    state::SharedState,
};

/// Routes exposing artist lookups.
pub fn router() -> Router<SharedState> {
    Router::new().route("/artists/suggestions", get(suggest_artists))
}

/// Query parameters of the suggestion endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SuggestionParams {
    /// Partial artist name typed so far.
    pub q: String,
}

/// Suggest artists matching a partial query.
#[utoipa::path(
    get,
    path = "/artists/suggestions",
    tag = "catalog",
    params(SuggestionParams),
    responses(
        (status = 200, description = "Matching artists", body = SuggestionsResponse)
    )
)]
pub async fn suggest_artists(
    State(state): State<SharedState>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let suggestions = suggestion_service::suggest_artists(&state, &params.q).await?;
    Ok(Json(suggestions))
}
