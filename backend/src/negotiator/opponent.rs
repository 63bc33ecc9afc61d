//! Opponent modelling
//!
//! Inference over an [`AgentState`]'s observation history. Nothing here sees
//! the opponent's real preferences: the opponent offer that came with the
//! highest reported utility stands in for them.

use super::state::AgentState;
use super::NegotiationError;
use crate::models::Offer;
use crate::utility::utility;

/// Fraction of the budget that must elapse before aggression is judged
const AGGRESSION_MIN_HISTORY: f64 = 0.5;

/// Share of negative readings above which the opponent counts as aggressive
const AGGRESSION_NEGATIVE_SHARE: f64 = 0.7;

/// Opponent offer paired with the highest utility it reported
///
/// Readings and offers are paired in arrival order; ties go to the earliest.
pub fn preference_proxy(state: &AgentState) -> Option<&Offer> {
    state
        .opponent_reported_utilities()
        .iter()
        .zip(state.opponent_offers())
        .fold(None, |best: Option<(f64, &Offer)>, (&reading, offer)| match best {
            Some((top, _)) if reading <= top => best,
            _ => Some((reading, offer)),
        })
        .map(|(_, offer)| offer)
}

/// Estimated utility of `candidate` to the opponent
///
/// Scores the candidate against the [`preference_proxy`] with the regular
/// utility model. Zero when nothing has been observed yet.
///
/// # Errors
/// Propagates [`NegotiationError::Utility`] if the candidate names an item
/// the proxy lacks.
pub fn expected_opponent_utility(
    state: &AgentState,
    candidate: &Offer,
) -> Result<f64, NegotiationError> {
    match preference_proxy(state) {
        Some(proxy) => Ok(utility(candidate.items(), proxy.items())?),
        None => Ok(0.0),
    }
}

/// More than 70% of the opponent's offers scored negative for us, judged
/// only after half the iteration budget worth of offers has been seen
pub fn opponent_is_aggressive(state: &AgentState) -> bool {
    let readings = state.opponent_offer_utilities();
    let limit = state.iteration_limit() as f64;
    if (readings.len() as f64) < AGGRESSION_MIN_HISTORY * limit {
        return false;
    }
    let negatives = readings.iter().filter(|&&u| u < 0.0).count();
    negatives as f64 > AGGRESSION_NEGATIVE_SHARE * readings.len() as f64
}

/// Whether the opponent has given in on every round we played as responder
///
/// A failed round in which we were side B means the opponent let the
/// negotiation die rather than accept our final offer. No history means no
/// evidence.
pub fn opponent_always_accepts_last(state: &AgentState) -> bool {
    let results = state.past_results();
    !results.is_empty() && !results.iter().any(|r| !r.was_a && !r.succeeded)
}

/// Opponent offer with the best strictly positive utility to us, falling
/// back to their latest offer
pub fn best_opponent_offer(state: &AgentState) -> Option<&Offer> {
    state
        .opponent_offer_utilities()
        .iter()
        .zip(state.opponent_offers())
        .fold(None, |best: Option<(f64, &Offer)>, (&value, offer)| {
            let top = best.map_or(0.0, |(top, _)| top);
            if value > top {
                Some((value, offer))
            } else {
                best
            }
        })
        .map(|(_, offer)| offer)
        .or_else(|| state.opponent_offers().last())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PreferenceOrder, RoundResult};

    fn state(items: &[&str], limit: usize) -> AgentState {
        let mut state = AgentState::new();
        let prefs = PreferenceOrder::new(items.iter().map(|s| s.to_string()).collect()).unwrap();
        state.initialize(prefs, limit).unwrap();
        state
    }

    #[test]
    fn test_no_observations_expects_zero() {
        let s = state(&["x", "y", "z"], 10);
        let value = expected_opponent_utility(&s, &Offer::from(vec!["x", "y", "z"])).unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_proxy_uses_highest_reported_utility() {
        let mut s = state(&["x", "y", "z"], 10);
        s.record_opponent_utility(2.0);
        s.observe(&Offer::from(vec!["y", "x", "z"])).unwrap();
        s.record_opponent_utility(9.0);
        s.observe(&Offer::from(vec!["z", "y", "x"])).unwrap();
        s.record_opponent_utility(4.0);
        s.observe(&Offer::from(vec!["x", "z", "y"])).unwrap();

        assert_eq!(preference_proxy(&s), Some(&Offer::from(vec!["z", "y", "x"])));
        let value = expected_opponent_utility(&s, &Offer::from(vec!["z", "y", "x"])).unwrap();
        assert!((value - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_aggression_requires_history() {
        let mut s = state(&["a", "b", "c", "d", "e", "f"], 4);
        // full reversal of six items scores 14.7 - 18 < 0
        let hostile = Offer::from(vec!["f", "e", "d", "c", "b", "a"]);
        s.observe(&hostile).unwrap();
        assert!(!opponent_is_aggressive(&s));
        s.observe(&hostile).unwrap();
        assert!(s.opponent_offer_utilities()[0] < 0.0);
        assert!(opponent_is_aggressive(&s));
    }

    #[test]
    fn test_always_accepts_last() {
        let mut s = state(&["x", "y"], 5);
        assert!(!opponent_always_accepts_last(&s));

        s.record_result(&RoundResult::agreed(Offer::from(vec!["x", "y"]), 4, 3.0, 3.0));
        assert!(opponent_always_accepts_last(&s));

        s.record_result(&RoundResult::exhausted(5, 2, 2));
        assert!(!opponent_always_accepts_last(&s));
    }
}
