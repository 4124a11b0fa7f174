use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::game::{
        FinishGameRequest, FinishGameResponse, GameStateResponse, GameSummary, GuessRequest,
        RoundOutcomeResponse, RoundResponse, StartGameRequest,
    },
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes driving the game session lifecycle.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games", post(start_game))
        .route("/games/round", post(next_round))
        .route("/games/guess", post(submit_guess))
        .route("/games/state", get(game_state))
        .route("/games/finish", post(finish_game))
}

/// Start a fresh game for an artist.
#[utoipa::path(
    post,
    path = "/games",
    tag = "game",
    request_body = StartGameRequest,
    responses(
        (status = 200, description = "Game started", body = GameSummary),
        (status = 400, description = "Blank artist or no playable tracks"),
        (status = 404, description = "Artist not found")
    )
)]
pub async fn start_game(
    State(state): State<SharedState>,
    Json(payload): Json<StartGameRequest>,
) -> Result<Json<GameSummary>, AppError> {
    let summary = game_service::start_game(&state, payload).await?;
    Ok(Json(summary))
}

/// Begin the next round, or learn that the game is over.
#[utoipa::path(
    post,
    path = "/games/round",
    tag = "game",
    responses(
        (status = 200, description = "Round started or game over", body = RoundResponse),
        (status = 404, description = "No active game")
    )
)]
pub async fn next_round(
    State(state): State<SharedState>,
) -> Result<Json<RoundResponse>, AppError> {
    let round = game_service::next_round(&state).await?;
    Ok(Json(round))
}

/// Submit the player's guess for the current round.
#[utoipa::path(
    post,
    path = "/games/guess",
    tag = "game",
    request_body = GuessRequest,
    responses(
        (status = 200, description = "Guess scored", body = RoundOutcomeResponse),
        (status = 404, description = "No active game"),
        (status = 409, description = "No round is awaiting a guess")
    )
)]
pub async fn submit_guess(
    State(state): State<SharedState>,
    Json(payload): Json<GuessRequest>,
) -> Result<Json<RoundOutcomeResponse>, AppError> {
    let outcome = game_service::submit_guess(&state, payload).await?;
    Ok(Json(outcome))
}

/// Read the current session projection.
#[utoipa::path(
    get,
    path = "/games/state",
    tag = "game",
    responses(
        (status = 200, description = "Current session", body = GameStateResponse),
        (status = 404, description = "No active game")
    )
)]
pub async fn game_state(
    State(state): State<SharedState>,
) -> Result<Json<GameStateResponse>, AppError> {
    let projection = game_service::game_state(&state).await?;
    Ok(Json(projection))
}

/// Record a finished game on the leaderboards.
#[utoipa::path(
    post,
    path = "/games/finish",
    tag = "game",
    request_body = FinishGameRequest,
    responses(
        (status = 200, description = "Score recorded", body = FinishGameResponse),
        (status = 404, description = "No active game"),
        (status = 409, description = "Game is not finished yet")
    )
)]
pub async fn finish_game(
    State(state): State<SharedState>,
    Json(payload): Json<FinishGameRequest>,
) -> Result<Json<FinishGameResponse>, AppError> {
    let result = game_service::finish_game(&state, payload).await?;
    Ok(Json(result))
}
