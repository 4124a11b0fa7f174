use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug)]
/// Dispatched payload carried across the SSE channel.
pub struct ServerEvent {
    /// Optional SSE event name.
    pub event: Option<String>,
    /// Serialised JSON data field.
    pub data: String,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a new round starts and its preview should play.
pub struct RoundStartedEvent {
    /// 1-based number of the round that just started.
    pub round: u32,
    /// Preview URL the frontend should play.
    pub preview_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the current round's guess has been scored.
pub struct RoundResolvedEvent {
    /// 1-based number of the resolved round.
    pub round: u32,
    /// Whether the guess was correct.
    pub is_correct: bool,
    /// Name of the track that was playing.
    pub correct_answer: String,
    /// Points earned this round.
    pub points_earned: u32,
    /// Cumulative score after this round.
    pub total_score: u32,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the game reaches its end.
pub struct GameFinishedEvent {
    /// Sum of the points earned across all rounds.
    pub final_score: u32,
    /// Rounds actually played.
    pub rounds_played: u32,
}
