//! In-memory state for a running guess-the-song session.

use std::collections::HashSet;
use std::time::Instant;

use rand::seq::IndexedRandom;
use thiserror::Error;
use uuid::Uuid;

use crate::state::{options::generate_options, scoring::ScoringConfig};

/// A playable track fetched from the music catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Catalog identifier, unique within an artist's pool.
    pub id: String,
    /// Display name; also the literal answer text shown among the options.
    pub name: String,
    /// URL of the short audio preview the frontend plays.
    pub preview_url: String,
    /// Identifier of the artist the track belongs to.
    pub artist_id: String,
}

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// The session is built but no round has started yet.
    NotStarted,
    /// Rounds are being played.
    InProgress,
    /// The final score is fixed; no further rounds are accepted.
    Completed,
}

/// Errors raised by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The artist resolved to zero playable tracks.
    #[error("track pool is empty")]
    EmptyPool,
    /// A guess arrived while no round was awaiting one.
    #[error("no round is awaiting a guess")]
    NoActiveRound,
    /// An operation arrived after the session completed.
    #[error("game is already complete")]
    Completed,
}

/// Result of asking the session to begin the next round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundStart {
    /// A new round began and awaits a guess.
    Round {
        /// 1-based number of the round that just started.
        round: u32,
        /// Option names shown to the player, correct one included.
        options: Vec<String>,
        /// Preview URL the frontend should play for this round.
        preview_url: String,
    },
    /// The session ended, by round limit or pool exhaustion.
    GameOver {
        /// Sum of the points earned across all rounds.
        final_score: u32,
        /// Number of rounds actually played.
        rounds_played: u32,
    },
}

/// Outcome of a submitted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Whether the guess matched the current track's name exactly.
    pub is_correct: bool,
    /// Name of the track that was playing.
    pub correct_answer: String,
    /// Points earned this round (zero when incorrect).
    pub points_earned: u32,
    /// Cumulative score after this round.
    pub total_score: u32,
}

/// One player's run through an artist's track pool.
///
/// The session owns its pool for its whole lifetime and is the only thing
/// that mutates it; dropping the session (or replacing it with a fresh one)
/// discards all round state.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    artist_name: String,
    pool: Vec<Track>,
    total_rounds: u32,
    option_count: usize,
    scoring: ScoringConfig,
    phase: GamePhase,
    current_round: u32,
    score: u32,
    used_track_ids: HashSet<String>,
    current_track: Option<Track>,
    round_started_at: Option<Instant>,
}

impl GameSession {
    /// Build a session over `tracks`, deduplicated by track id.
    pub fn new(
        artist_name: String,
        tracks: Vec<Track>,
        total_rounds: u32,
        option_count: usize,
        scoring: ScoringConfig,
    ) -> Result<Self, GameError> {
        let mut seen = HashSet::new();
        let pool: Vec<Track> = tracks
            .into_iter()
            .filter(|track| seen.insert(track.id.clone()))
            .collect();

        if pool.is_empty() {
            return Err(GameError::EmptyPool);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            artist_name,
            pool,
            total_rounds,
            option_count,
            scoring,
            phase: GamePhase::NotStarted,
            current_round: 0,
            score: 0,
            used_track_ids: HashSet::new(),
            current_track: None,
            round_started_at: None,
        })
    }

    /// Identifier of this session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Resolved display name of the artist being played.
    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// 1-based number of the most recently started round (0 before the first).
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Rounds the game runs at most.
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Cumulative score so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of distinct tracks available to the session.
    pub fn track_count(&self) -> usize {
        self.pool.len()
    }

    /// Track currently playing, if a round has been started.
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Begin the next round, or report the game over.
    ///
    /// The game ends once `total_rounds` rounds have been played or the pool
    /// holds no unused track, whichever comes first; exhaustion is a normal
    /// completion, not an error. Starting a new round before the previous one
    /// was guessed abandons it without scoring.
    pub fn begin_next_round(&mut self) -> Result<RoundStart, GameError> {
        if self.phase == GamePhase::Completed {
            return Err(GameError::Completed);
        }

        if self.current_round >= self.total_rounds {
            return Ok(self.finish());
        }

        let unused: Vec<&Track> = self
            .pool
            .iter()
            .filter(|track| !self.used_track_ids.contains(&track.id))
            .collect();
        let Some(track) = unused.choose(&mut rand::rng()).map(|t| (*t).clone()) else {
            return Ok(self.finish());
        };

        self.phase = GamePhase::InProgress;
        self.current_round += 1;
        self.used_track_ids.insert(track.id.clone());

        let options = generate_options(&track, &self.pool, self.option_count);
        let preview_url = track.preview_url.clone();
        self.current_track = Some(track);
        self.round_started_at = Some(Instant::now());

        Ok(RoundStart::Round {
            round: self.current_round,
            options,
            preview_url,
        })
    }

    fn finish(&mut self) -> RoundStart {
        self.phase = GamePhase::Completed;
        self.current_track = None;
        self.round_started_at = None;

        RoundStart::GameOver {
            final_score: self.score,
            rounds_played: self.current_round,
        }
    }

    /// Score a guess against the current round.
    ///
    /// The comparison is exact and case-sensitive, matching the options'
    /// literal text. Each round accepts a single guess: the round timer is
    /// cleared on submission, so a repeat call fails with
    /// [`GameError::NoActiveRound`] instead of awarding points twice.
    pub fn submit_guess(&mut self, guess: &str) -> Result<RoundOutcome, GameError> {
        if self.phase == GamePhase::Completed {
            return Err(GameError::Completed);
        }

        let (Some(track), Some(started_at)) = (self.current_track.as_ref(), self.round_started_at)
        else {
            return Err(GameError::NoActiveRound);
        };

        let is_correct = guess == track.name;
        let points_earned = if is_correct {
            self.scoring.score_for(started_at.elapsed())
        } else {
            0
        };
        let correct_answer = track.name.clone();

        self.score += points_earned;
        self.round_started_at = None;

        Ok(RoundOutcome {
            is_correct,
            correct_answer,
            points_earned,
            total_score: self.score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: usize) -> Track {
        Track {
            id: format!("t{id}"),
            name: format!("Track {id}"),
            preview_url: format!("https://previews.example/t{id}.m4a"),
            artist_id: "artist-1".to_owned(),
        }
    }

    fn session(pool_size: usize, total_rounds: u32) -> GameSession {
        GameSession::new(
            "Test Artist".to_owned(),
            (0..pool_size).map(track).collect(),
            total_rounds,
            4,
            ScoringConfig::default(),
        )
        .unwrap()
    }

    fn begin(session: &mut GameSession) -> RoundStart {
        session.begin_next_round().unwrap()
    }

    #[test]
    fn empty_pool_is_rejected_at_construction() {
        let result = GameSession::new(
            "Nobody".to_owned(),
            Vec::new(),
            10,
            4,
            ScoringConfig::default(),
        );
        assert_eq!(result.unwrap_err(), GameError::EmptyPool);
    }

    #[test]
    fn duplicate_track_ids_are_deduplicated() {
        let mut tracks = vec![track(0), track(1)];
        tracks.push(track(0));
        let session = GameSession::new(
            "Test Artist".to_owned(),
            tracks,
            10,
            4,
            ScoringConfig::default(),
        )
        .unwrap();
        assert_eq!(session.track_count(), 2);
    }

    #[test]
    fn first_round_moves_the_session_in_progress() {
        let mut session = session(5, 10);
        assert_eq!(session.phase(), GamePhase::NotStarted);

        match begin(&mut session) {
            RoundStart::Round {
                round,
                options,
                preview_url,
            } => {
                assert_eq!(round, 1);
                assert_eq!(options.len(), 4);
                assert!(!preview_url.is_empty());
            }
            other => panic!("expected a round, got {other:?}"),
        }
        assert_eq!(session.phase(), GamePhase::InProgress);
    }

    #[test]
    fn correct_guess_within_grace_earns_max_score() {
        let mut session = session(5, 10);
        begin(&mut session);

        let answer = session.current_track().unwrap().name.clone();
        let outcome = session.submit_guess(&answer).unwrap();

        assert!(outcome.is_correct);
        assert_eq!(outcome.points_earned, 100);
        assert_eq!(outcome.total_score, 100);
        assert_eq!(session.score(), 100);
    }

    #[test]
    fn wrong_guess_earns_nothing_but_reveals_the_answer() {
        let mut session = session(5, 10);
        begin(&mut session);

        let answer = session.current_track().unwrap().name.clone();
        let outcome = session.submit_guess("definitely not it").unwrap();

        assert!(!outcome.is_correct);
        assert_eq!(outcome.points_earned, 0);
        assert_eq!(outcome.total_score, 0);
        assert_eq!(outcome.correct_answer, answer);
    }

    #[test]
    fn guess_comparison_is_case_sensitive() {
        let mut session = session(5, 10);
        begin(&mut session);

        let answer = session.current_track().unwrap().name.clone();
        let outcome = session.submit_guess(&answer.to_uppercase()).unwrap();
        assert!(!outcome.is_correct);
    }

    #[test]
    fn second_guess_in_the_same_round_is_rejected() {
        let mut session = session(5, 10);
        begin(&mut session);

        let answer = session.current_track().unwrap().name.clone();
        session.submit_guess(&answer).unwrap();

        assert_eq!(
            session.submit_guess(&answer).unwrap_err(),
            GameError::NoActiveRound
        );
        assert_eq!(session.score(), 100, "no double award");
    }

    #[test]
    fn guess_before_any_round_is_rejected() {
        let mut session = session(5, 10);
        assert_eq!(
            session.submit_guess("anything").unwrap_err(),
            GameError::NoActiveRound
        );
    }

    #[test]
    fn tracks_are_never_repeated_across_rounds() {
        let mut session = session(5, 10);
        let mut answers = HashSet::new();
        for _ in 0..5 {
            begin(&mut session);
            let answer = session.current_track().unwrap().name.clone();
            assert!(answers.insert(answer.clone()), "repeated track {answer}");
            session.submit_guess(&answer).unwrap();
        }
    }

    #[test]
    fn round_limit_ends_the_game() {
        let mut session = session(12, 10);
        for expected in 1..=10 {
            match begin(&mut session) {
                RoundStart::Round { round, .. } => assert_eq!(round, expected),
                other => panic!("expected round {expected}, got {other:?}"),
            }
            let answer = session.current_track().unwrap().name.clone();
            session.submit_guess(&answer).unwrap();
        }

        match begin(&mut session) {
            RoundStart::GameOver {
                final_score,
                rounds_played,
            } => {
                assert_eq!(rounds_played, 10);
                assert_eq!(final_score, 1000);
            }
            other => panic!("expected game over, got {other:?}"),
        }
        assert_eq!(session.phase(), GamePhase::Completed);
    }

    #[test]
    fn pool_exhaustion_ends_the_game_before_the_round_limit() {
        let mut session = session(5, 10);
        let mut earned = 0;
        for _ in 0..5 {
            begin(&mut session);
            let answer = session.current_track().unwrap().name.clone();
            earned += session.submit_guess(&answer).unwrap().points_earned;
        }

        match begin(&mut session) {
            RoundStart::GameOver {
                final_score,
                rounds_played,
            } => {
                assert_eq!(rounds_played, 5);
                assert_eq!(final_score, earned);
            }
            other => panic!("expected game over, got {other:?}"),
        }
    }

    #[test]
    fn operations_after_completion_fail_terminally() {
        let mut session = session(1, 10);
        begin(&mut session);
        let answer = session.current_track().unwrap().name.clone();
        session.submit_guess(&answer).unwrap();
        begin(&mut session);
        assert_eq!(session.phase(), GamePhase::Completed);

        assert_eq!(
            session.begin_next_round().unwrap_err(),
            GameError::Completed
        );
        assert_eq!(session.submit_guess("late").unwrap_err(), GameError::Completed);
    }

    #[test]
    fn abandoning_a_round_leaves_no_residual_state() {
        let mut session = session(6, 10);
        begin(&mut session);
        let first = session.current_track().unwrap().id.clone();

        // Start the next round without guessing the first.
        match begin(&mut session) {
            RoundStart::Round { round, .. } => assert_eq!(round, 2),
            other => panic!("expected round 2, got {other:?}"),
        }
        let second = session.current_track().unwrap().clone();
        assert_ne!(first, second.id, "abandoned track stays used");

        let outcome = session.submit_guess(&second.name).unwrap();
        assert!(outcome.is_correct);
        assert_eq!(outcome.total_score, 100, "abandoned round scored nothing");
    }

    #[test]
    fn cumulative_score_stays_within_bounds() {
        let mut session = session(12, 10);
        loop {
            match begin(&mut session) {
                RoundStart::Round { .. } => {
                    let answer = session.current_track().unwrap().name.clone();
                    session.submit_guess(&answer).unwrap();
                    assert!(session.score() <= 10 * 100);
                }
                RoundStart::GameOver { final_score, .. } => {
                    assert!(final_score <= 10 * 100);
                    break;
                }
            }
        }
    }
}
