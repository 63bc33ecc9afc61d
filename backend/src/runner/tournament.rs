//! Tournament: one baseline strategy against a field of opponents
//!
//! For every opponent a fresh pair of negotiators is built; the pair is then
//! reused across all scenarios so learning strategies carry their history
//! from one scenario to the next. The baseline always plays side A.

use super::match_runner::{MatchConfig, MatchRunner, MatchSummary};
use crate::models::{RoundResult, ScenarioConfig};
use crate::negotiator::{NegotiationError, StrategyKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::info;

/// A scenario together with the name it is reported under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    pub config: ScenarioConfig,
}

impl NamedScenario {
    pub fn new(name: impl Into<String>, config: ScenarioConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// One pairing's match on one scenario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub summary: MatchSummary,
    /// Every round in play order
    pub rounds: Vec<RoundResult>,
}

/// Tournament results
///
/// `pairings` is keyed by `"<A name> vs. <B name>"`, then by scenario name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentReport {
    pub pairings: BTreeMap<String, BTreeMap<String, ScenarioReport>>,
    pub total_points_a: f64,
    pub total_points_b: f64,
}

impl TournamentReport {
    pub fn pairing(&self, key: &str) -> Option<&BTreeMap<String, ScenarioReport>> {
        self.pairings.get(key)
    }
}

/// Play `baseline` against every strategy in `opponents` on every scenario
///
/// A single [`MatchRunner`] (and so a single seeded random stream) drives the
/// whole tournament; the same inputs always give the same report.
///
/// # Errors
/// [`NegotiationError::InvalidConfig`] if two scenarios share a name or an
/// opponent is listed twice, since either would collide in the report.
pub fn run_tournament(
    config: MatchConfig,
    scenarios: &[NamedScenario],
    baseline: StrategyKind,
    opponents: &[StrategyKind],
) -> Result<TournamentReport, NegotiationError> {
    check_unique("scenario", scenarios.iter().map(|s| s.name.as_str()))?;
    check_unique("opponent", opponents.iter().map(|k| k.key()))?;

    let mut runner = MatchRunner::new(config)?;
    let mut report = TournamentReport::default();

    for &opponent in opponents {
        let mut a = baseline.build();
        let mut b = opponent.build();
        let key = format!("{} vs. {}", a.name(), b.name());
        info!(pairing = %key, "starting pairing");

        let mut per_scenario = BTreeMap::new();
        for scenario in scenarios {
            let outcome = runner.run(&scenario.config, a.as_mut(), b.as_mut())?;
            report.total_points_a += outcome.summary.a.score;
            report.total_points_b += outcome.summary.b.score;
            per_scenario.insert(
                scenario.name.clone(),
                ScenarioReport {
                    summary: outcome.summary,
                    rounds: outcome.rounds,
                },
            );
        }
        report.pairings.insert(key, per_scenario);
    }

    Ok(report)
}

fn check_unique<'a>(
    what: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), NegotiationError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(NegotiationError::InvalidConfig(format!(
                "duplicate {} '{}'",
                what, name
            )));
        }
    }
    Ok(())
}
