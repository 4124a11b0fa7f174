use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the Guess The Song backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::start_game,
        crate::routes::game::next_round,
        crate::routes::game::submit_guess,
        crate::routes::game::game_state,
        crate::routes::game::finish_game,
        crate::routes::leaderboard::artist_scores,
        crate::routes::leaderboard::recent_scores,
        crate::routes::leaderboard::artist_high_score,
        crate::routes::catalog::suggest_artists,
        crate::routes::sse::game_stream,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::StartGameRequest,
            crate::dto::game::GameSummary,
            crate::dto::game::RoundResponse,
            crate::dto::game::GuessRequest,
            crate::dto::game::RoundOutcomeResponse,
            crate::dto::game::GameStateResponse,
            crate::dto::game::FinishGameRequest,
            crate::dto::game::FinishGameResponse,
            crate::dto::leaderboard::LeaderboardResponse,
            crate::dto::leaderboard::RecentScoresResponse,
            crate::dto::leaderboard::HighScoreSummary,
            crate::dto::catalog::SuggestionsResponse,
            crate::dto::sse::RoundStartedEvent,
            crate::dto::sse::RoundResolvedEvent,
            crate::dto::sse::GameFinishedEvent,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Game session lifecycle"),
        (name = "leaderboard", description = "Score boards and records"),
        (name = "catalog", description = "Artist lookups"),
        (name = "sse", description = "Server-sent events stream"),
    )
)]
pub struct ApiDoc;
