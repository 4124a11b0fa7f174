use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::validation::validate_not_blank,
    state::game::{GamePhase, GameSession, RoundOutcome, RoundStart},
};

/// Payload used to start a new game for an artist.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct StartGameRequest {
    /// Artist the player wants to be quizzed on.
    #[validate(custom(function = validate_not_blank))]
    pub artist: String,
}

/// Summary returned once a game has been started.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameSummary {
    /// Identifier of the freshly created session.
    pub id: Uuid,
    /// Resolved display name of the artist.
    pub artist: String,
    /// Number of distinct playable tracks in the pool.
    pub track_count: usize,
    /// Rounds the game will run at most.
    pub total_rounds: u32,
    /// Last score previously recorded for this artist, if any.
    pub previous_high_score: Option<u32>,
}

impl From<&GameSession> for GameSummary {
    fn from(session: &GameSession) -> Self {
        Self {
            id: session.id(),
            artist: session.artist_name().to_owned(),
            track_count: session.track_count(),
            total_rounds: session.total_rounds(),
            previous_high_score: None,
        }
    }
}

/// Next-round payload: either a fresh round or the game-over report.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundResponse {
    /// Whether the game ended instead of a new round starting.
    pub game_over: bool,
    /// 1-based number of the round that just started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    /// Rounds the game runs at most.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rounds: Option<u32>,
    /// Option names shown to the player, correct one included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Preview URL the frontend should play for this round.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    /// Final score, present once the game is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u32>,
    /// Rounds actually played, present once the game is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounds_played: Option<u32>,
}

impl RoundResponse {
    /// Build the response for a round-start result.
    pub fn from_start(start: RoundStart, total_rounds: u32) -> Self {
        match start {
            RoundStart::Round {
                round,
                options,
                preview_url,
            } => Self {
                game_over: false,
                round: Some(round),
                total_rounds: Some(total_rounds),
                options: Some(options),
                preview_url: Some(preview_url),
                final_score: None,
                rounds_played: None,
            },
            RoundStart::GameOver {
                final_score,
                rounds_played,
            } => Self {
                game_over: true,
                round: None,
                total_rounds: Some(total_rounds),
                options: None,
                preview_url: None,
                final_score: Some(final_score),
                rounds_played: Some(rounds_played),
            },
        }
    }
}

/// Payload carrying the player's answer for the current round.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct GuessRequest {
    /// Option text the player picked; compared literally, case included.
    #[validate(custom(function = validate_not_blank))]
    pub guess: String,
}

/// Outcome of a submitted guess.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundOutcomeResponse {
    /// Whether the guess matched the playing track.
    pub is_correct: bool,
    /// Name of the track that was playing.
    pub correct_answer: String,
    /// Points earned this round (zero when incorrect).
    pub points_earned: u32,
    /// Cumulative score after this round.
    pub total_score: u32,
}

impl From<RoundOutcome> for RoundOutcomeResponse {
    fn from(outcome: RoundOutcome) -> Self {
        Self {
            is_correct: outcome.is_correct,
            correct_answer: outcome.correct_answer,
            points_earned: outcome.points_earned,
            total_score: outcome.total_score,
        }
    }
}

/// Read-only projection of the current session.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameStateResponse {
    /// Resolved display name of the artist.
    pub artist: String,
    /// Lifecycle phase of the session.
    pub phase: &'static str,
    /// 1-based number of the most recently started round.
    pub current_round: u32,
    /// Rounds the game runs at most.
    pub total_rounds: u32,
    /// Cumulative score so far.
    pub score: u32,
}

impl From<&GameSession> for GameStateResponse {
    fn from(session: &GameSession) -> Self {
        Self {
            artist: session.artist_name().to_owned(),
            phase: phase_label(session.phase()),
            current_round: session.current_round(),
            total_rounds: session.total_rounds(),
            score: session.score(),
        }
    }
}

fn phase_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::NotStarted => "not_started",
        GamePhase::InProgress => "in_progress",
        GamePhase::Completed => "completed",
    }
}

fn default_player_name() -> String {
    "Anonymous".to_owned()
}

/// Payload recording a finished game on the leaderboards.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct FinishGameRequest {
    /// Name shown on the leaderboard; defaults to "Anonymous".
    #[serde(default = "default_player_name")]
    #[validate(custom(function = validate_not_blank))]
    pub player_name: String,
}

/// Result of recording a finished game.
#[derive(Debug, Serialize, ToSchema)]
pub struct FinishGameResponse {
    /// Artist the game was played against.
    pub artist: String,
    /// Final score that was recorded.
    pub final_score: u32,
    /// 1-based position on the artist's leaderboard; beyond the retained
    /// size it means the score did not place.
    pub rank: usize,
    /// Whether the score made the retained leaderboard.
    pub placed: bool,
    /// Score this artist's record held before this game, if any.
    pub previous_high_score: Option<u32>,
    /// Whether this game beat the previous record.
    pub beat_previous_high_score: Option<bool>,
}
