//! Match runner
//!
//! Runs repeated negotiations of one scenario between the same two
//! negotiators. Negotiators are initialised once per scenario and keep their
//! histories across rounds, so strategies that learn from past rounds see
//! them.
//!
//! # Scoring
//!
//! Scores are cumulative. After each round, a side is credited with a win if
//! its cumulative score is strictly greater than the other side's.

use super::transcript::transcript_hash;
use crate::models::{RoundResult, ScenarioConfig};
use crate::negotiator::{NegotiationError, Negotiator};
use crate::rng::RngManager;
use crate::session::NegotiationSession;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of rounds per scenario
pub const DEFAULT_ROUNDS: usize = 10;

/// Match-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Negotiations per scenario
    pub rounds: usize,

    /// Seed for the match's random source
    pub rng_seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            rng_seed: 12345,
        }
    }
}

/// Cumulative result for one side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideSummary {
    pub wins: usize,
    pub score: f64,
}

/// Aggregate over the rounds of one scenario for one pairing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub a: SideSummary,
    pub b: SideSummary,
}

impl MatchSummary {
    /// Fold one round into the running totals
    pub fn record(&mut self, result: &RoundResult) {
        self.a.score += result.points_a;
        self.b.score += result.points_b;
        if self.a.score > self.b.score {
            self.a.wins += 1;
        } else if self.b.score > self.a.score {
            self.b.wins += 1;
        }
    }
}

/// Everything a match produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub summary: MatchSummary,
    pub rounds: Vec<RoundResult>,
    /// SHA-256 of the round results
    pub transcript_hash: String,
}

impl MatchOutcome {
    pub fn successful_rounds(&self) -> usize {
        self.rounds.iter().filter(|r| r.succeeded).count()
    }
}

/// Runs matches from a single seeded random stream
pub struct MatchRunner {
    config: MatchConfig,
    rng: RngManager,
}

impl MatchRunner {
    /// # Errors
    /// [`NegotiationError::InvalidConfig`] if `rounds` is zero.
    pub fn new(config: MatchConfig) -> Result<Self, NegotiationError> {
        if config.rounds == 0 {
            return Err(NegotiationError::InvalidConfig(
                "rounds must be positive".to_string(),
            ));
        }
        let rng = RngManager::new(config.rng_seed);
        Ok(Self { config, rng })
    }

    /// Play `rounds` negotiations of `scenario`, `a` opening every round
    pub fn run(
        &mut self,
        scenario: &ScenarioConfig,
        a: &mut dyn Negotiator,
        b: &mut dyn Negotiator,
    ) -> Result<MatchOutcome, NegotiationError> {
        scenario.validate()?;
        let limit = scenario.iteration_limit;
        a.initialize(scenario.preference_order_a()?, limit)?;
        b.initialize(scenario.preference_order_b()?, limit)?;

        let mut summary = MatchSummary::default();
        let mut rounds = Vec::with_capacity(self.config.rounds);

        for round in 0..self.config.rounds {
            let result = NegotiationSession::new(limit, &mut self.rng)?.run(a, b)?;
            a.receive_results(&result);
            b.receive_results(&result);
            summary.record(&result);
            debug!(
                round,
                succeeded = result.succeeded,
                points_a = result.points_a,
                points_b = result.points_b,
                "round complete"
            );
            rounds.push(result);
        }

        let transcript_hash = transcript_hash(&rounds)?;
        Ok(MatchOutcome {
            summary,
            rounds,
            transcript_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Offer;

    #[test]
    fn test_zero_rounds_rejected() {
        let config = MatchConfig {
            rounds: 0,
            rng_seed: 1,
        };
        assert!(matches!(
            MatchRunner::new(config),
            Err(NegotiationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_summary_wins_use_cumulative_scores() {
        let mut summary = MatchSummary::default();
        summary.record(&RoundResult::agreed(Offer::from(vec!["x"]), 0, 5.0, 1.0));
        summary.record(&RoundResult::agreed(Offer::from(vec!["x"]), 0, 1.0, 3.0));

        // cumulative 6 vs 4 after both rounds: A wins both
        assert_eq!(summary.a.wins, 2);
        assert_eq!(summary.b.wins, 0);
        assert_eq!(summary.a.score, 6.0);
        assert_eq!(summary.b.score, 4.0);
    }

    #[test]
    fn test_tied_cumulative_scores_award_no_win() {
        let mut summary = MatchSummary::default();
        summary.record(&RoundResult::exhausted(3, 2, 2));
        assert_eq!(summary.a.wins, 0);
        assert_eq!(summary.b.wins, 0);
    }
}
