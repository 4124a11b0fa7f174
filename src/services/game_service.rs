//! Core game orchestration: session bootstrap, rounds, guesses, completion.

use validator::Validate;

use crate::{
    dao::leaderboard::MAX_ARTIST_ENTRIES,
    dto::game::{
        FinishGameRequest, FinishGameResponse, GameStateResponse, GameSummary, GuessRequest,
        RoundOutcomeResponse, RoundResponse, StartGameRequest,
    },
    error::ServiceError,
    services::sse_events,
    state::{
        SharedState,
        game::{GamePhase, GameSession, RoundStart},
    },
};

/// Resolve the artist through the catalog and install a fresh session.
///
/// Replaces any existing session: starting a new game discards the previous
/// one along with its pool.
pub async fn start_game(
    state: &SharedState,
    request: StartGameRequest,
) -> Result<GameSummary, ServiceError> {
    validate(&request)?;
    let artist_query = request.artist.trim();

    let catalog = state.catalog();
    let Some(artist) = catalog.find_artist(artist_query).await? else {
        return Err(ServiceError::NotFound(format!(
            "artist `{artist_query}` not found"
        )));
    };
    let tracks = catalog.top_tracks(&artist.id).await?;

    let config = state.config();
    let session = GameSession::new(
        artist.name,
        tracks,
        config.total_rounds,
        config.option_count,
        config.scoring.clone(),
    )?;

    let mut summary = GameSummary::from(&session);
    summary.previous_high_score = state
        .high_scores()
        .artist_high_score(session.artist_name())
        .await?
        .map(|record| record.score);

    {
        let mut slot = state.current_game().write().await;
        *slot = Some(session);
    }

    Ok(summary)
}

/// Begin the next round of the current session, or report the game over.
pub async fn next_round(state: &SharedState) -> Result<RoundResponse, ServiceError> {
    let mut slot = state.current_game().write().await;
    let session = slot
        .as_mut()
        .ok_or_else(|| ServiceError::NotFound("no active game".into()))?;

    let start = session.begin_next_round()?;
    let total_rounds = session.total_rounds();

    match &start {
        RoundStart::Round {
            round, preview_url, ..
        } => sse_events::broadcast_round_started(state, *round, preview_url),
        RoundStart::GameOver {
            final_score,
            rounds_played,
        } => sse_events::broadcast_game_finished(state, *final_score, *rounds_played),
    }

    Ok(RoundResponse::from_start(start, total_rounds))
}

/// Score a submitted guess against the current round.
pub async fn submit_guess(
    state: &SharedState,
    request: GuessRequest,
) -> Result<RoundOutcomeResponse, ServiceError> {
    validate(&request)?;

    let mut slot = state.current_game().write().await;
    let session = slot
        .as_mut()
        .ok_or_else(|| ServiceError::NotFound("no active game".into()))?;

    let outcome = session.submit_guess(&request.guess)?;
    sse_events::broadcast_round_resolved(state, session.current_round(), &outcome);

    Ok(outcome.into())
}

/// Read-only projection of the current session.
pub async fn game_state(state: &SharedState) -> Result<GameStateResponse, ServiceError> {
    let guard = state.current_game().read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| ServiceError::NotFound("no active game".into()))?;

    Ok(GameStateResponse::from(session))
}

/// Record a finished game on the leaderboards and the high-score record,
/// then clear the session slot.
pub async fn finish_game(
    state: &SharedState,
    request: FinishGameRequest,
) -> Result<FinishGameResponse, ServiceError> {
    validate(&request)?;

    let (artist, final_score) = {
        let guard = state.current_game().read().await;
        let session = guard
            .as_ref()
            .ok_or_else(|| ServiceError::NotFound("no active game".into()))?;
        if session.phase() != GamePhase::Completed {
            return Err(ServiceError::InvalidState("game is not finished yet".into()));
        }
        (session.artist_name().to_owned(), session.score())
    };

    let previous = state.high_scores().artist_high_score(&artist).await?;
    let rank = state
        .leaderboard()
        .add_score(&artist, final_score, request.player_name.trim())
        .await?;
    state.high_scores().save_high_score(&artist, final_score).await?;

    {
        let mut slot = state.current_game().write().await;
        *slot = None;
    }

    let previous_high_score = previous.map(|record| record.score);
    Ok(FinishGameResponse {
        artist,
        final_score,
        rank,
        placed: rank <= MAX_ARTIST_ENTRIES,
        previous_high_score,
        beat_previous_high_score: previous_high_score.map(|score| final_score > score),
    })
}

fn validate(payload: &impl Validate) -> Result<(), ServiceError> {
    payload
        .validate()
        .map_err(|err| ServiceError::InvalidInput(format!("validation failed: {err}")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        catalog::fixture::FixtureCatalog,
        config::AppConfig,
        dao::kv::MemoryStore,
        state::AppState,
    };

    use super::*;

    fn app_state() -> SharedState {
        AppState::new(
            AppConfig::default(),
            Arc::new(FixtureCatalog::default()),
            Arc::new(MemoryStore::new()),
        )
    }

    #[tokio::test]
    async fn unknown_artist_cannot_start_a_game() {
        let state = app_state();
        let err = start_game(
            &state,
            StartGameRequest {
                artist: "nobody anyone knows".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn blank_artist_is_rejected_before_the_catalog_is_hit() {
        let state = app_state();
        let err = start_game(&state, StartGameRequest { artist: "  ".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn full_game_over_a_small_pool_ends_by_exhaustion() {
        let state = app_state();

        // Drake has 3 fixture tracks; the default game wants 10 rounds.
        let summary = start_game(
            &state,
            StartGameRequest {
                artist: "Drake".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(summary.artist, "Drake");
        assert_eq!(summary.track_count, 3);
        assert_eq!(summary.previous_high_score, None);

        let mut earned = 0;
        let mut rounds = 0;
        loop {
            let round = next_round(&state).await.unwrap();
            if round.game_over {
                assert_eq!(round.rounds_played, Some(3));
                assert_eq!(round.final_score, Some(earned));
                break;
            }
            rounds += 1;
            let options = round.options.unwrap();
            assert_eq!(options.len(), 4);

            let outcome = submit_guess(
                &state,
                GuessRequest {
                    guess: options[0].clone(),
                },
            )
            .await
            .unwrap();
            assert_eq!(outcome.is_correct, options[0] == outcome.correct_answer);
            earned += outcome.points_earned;
        }
        assert_eq!(rounds, 3);

        let finish = finish_game(
            &state,
            FinishGameRequest {
                player_name: "tester".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(finish.final_score, earned);
        assert_eq!(finish.rank, 1);
        assert!(finish.placed);
        assert_eq!(finish.previous_high_score, None);

        // The slot is cleared once the game is recorded.
        assert!(matches!(
            game_state(&state).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));

        let board = state.leaderboard().artist_scores("Drake").await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].score, earned);
    }

    #[tokio::test]
    async fn finishing_an_unfinished_game_is_rejected() {
        let state = app_state();
        start_game(
            &state,
            StartGameRequest {
                artist: "Drake".into(),
            },
        )
        .await
        .unwrap();
        next_round(&state).await.unwrap();

        let err = finish_game(
            &state,
            FinishGameRequest {
                player_name: "tester".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[tokio::test]
    async fn starting_a_new_game_discards_the_previous_session() {
        let state = app_state();
        start_game(
            &state,
            StartGameRequest {
                artist: "Drake".into(),
            },
        )
        .await
        .unwrap();
        next_round(&state).await.unwrap();

        start_game(
            &state,
            StartGameRequest {
                artist: "Taylor Swift".into(),
            },
        )
        .await
        .unwrap();

        let projection = game_state(&state).await.unwrap();
        assert_eq!(projection.artist, "Taylor Swift");
        assert_eq!(projection.current_round, 0);
        assert_eq!(projection.score, 0);
    }
}
