//! Typed broadcast helpers for the game SSE stream.

use serde::Serialize;
use tracing::warn;

use crate::{
    dto::sse::{GameFinishedEvent, RoundResolvedEvent, RoundStartedEvent, ServerEvent},
    state::{SharedState, game::RoundOutcome},
};

const EVENT_ROUND_STARTED: &str = "round.started";
const EVENT_ROUND_RESOLVED: &str = "round.resolved";
const EVENT_GAME_FINISHED: &str = "game.finished";

/// Broadcast that a new round started and its preview should play.
pub fn broadcast_round_started(state: &SharedState, round: u32, preview_url: &str) {
    let payload = RoundStartedEvent {
        round,
        preview_url: preview_url.to_owned(),
    };
    send_event(state, EVENT_ROUND_STARTED, &payload);
}

/// Broadcast the scored outcome of the current round.
pub fn broadcast_round_resolved(state: &SharedState, round: u32, outcome: &RoundOutcome) {
    let payload = RoundResolvedEvent {
        round,
        is_correct: outcome.is_correct,
        correct_answer: outcome.correct_answer.clone(),
        points_earned: outcome.points_earned,
        total_score: outcome.total_score,
    };
    send_event(state, EVENT_ROUND_RESOLVED, &payload);
}

/// Broadcast that the game ended with its final score.
pub fn broadcast_game_finished(state: &SharedState, final_score: u32, rounds_played: u32) {
    let payload = GameFinishedEvent {
        final_score,
        rounds_played,
    };
    send_event(state, EVENT_GAME_FINISHED, &payload);
}

fn send_event<T: Serialize>(state: &SharedState, event: &str, payload: &T) {
    match ServerEvent::json(event.to_owned(), payload) {
        Ok(server_event) => state.game_events().broadcast(server_event),
        Err(err) => warn!(event, error = %err, "failed to serialise server event"),
    }
}
