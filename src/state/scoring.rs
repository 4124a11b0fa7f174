//! Elapsed-time scoring for a single round.

use std::time::Duration;

/// Parameters controlling how round points decay over time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Points awarded for a correct guess within the grace period.
    pub max_score: u32,
    /// Floor below which the decay never drops a correct guess.
    pub min_score: u32,
    /// Window (milliseconds) after round start during which the full score applies.
    pub grace_period_ms: u64,
    /// Points deducted per second spent past the grace period.
    pub decay_per_second: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_score: 100,
            min_score: 10,
            grace_period_ms: 5000,
            decay_per_second: 5,
        }
    }
}

impl ScoringConfig {
    /// Compute the points a correct guess earns after `elapsed` time.
    ///
    /// The score is a pure function of the elapsed wall-clock time between
    /// round start and guess; it never depends on tick counters, so a
    /// suspended scheduler can only lower the result, never corrupt it.
    pub fn score_for(&self, elapsed: Duration) -> u32 {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if elapsed_ms <= self.grace_period_ms {
            return self.max_score;
        }

        let over_ms = elapsed_ms - self.grace_period_ms;
        let deduction =
            u32::try_from(over_ms.saturating_mul(u64::from(self.decay_per_second)) / 1000)
                .unwrap_or(u32::MAX);

        self.max_score.saturating_sub(deduction).max(self.min_score)
    }
}
