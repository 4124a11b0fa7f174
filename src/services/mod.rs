/// OpenAPI documentation aggregate.
pub mod documentation;
/// Core game orchestration: bootstrap, rounds, guesses, completion.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Leaderboard and high-score projections.
pub mod leaderboard_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Artist suggestion lookups with latest-request-wins semantics.
pub mod suggestion_service;
