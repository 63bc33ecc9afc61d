//! Round outcomes
//!
//! A [`RoundResult`] is produced once per negotiation and handed to both
//! negotiators and to the match aggregator. Each negotiator keeps its own
//! view of it as a [`RoundRecord`].

use crate::models::offer::Offer;
use serde::{Deserialize, Serialize};

/// Which seat a negotiator occupies in a session
///
/// Side A always makes the opening offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Outcome of one negotiation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Whether the two sides exchanged identical offers
    pub succeeded: bool,

    /// The offer both sides agreed on (None on failure)
    pub agreed_offer: Option<Offer>,

    /// Iteration index of the agreement, or the iteration limit on failure
    pub iterations_used: usize,

    /// Points assigned to side A
    pub points_a: f64,

    /// Points assigned to side B
    pub points_b: f64,
}

impl RoundResult {
    /// Successful round: points are each side's own utility of the agreement
    pub fn agreed(offer: Offer, iteration: usize, points_a: f64, points_b: f64) -> Self {
        Self {
            succeeded: true,
            agreed_offer: Some(offer),
            iterations_used: iteration,
            points_a,
            points_b,
        }
    }

    /// Failed round: each side is penalised by the size of its own item list
    pub fn exhausted(iteration_limit: usize, items_a: usize, items_b: usize) -> Self {
        Self {
            succeeded: false,
            agreed_offer: None,
            iterations_used: iteration_limit,
            points_a: -(items_a as f64),
            points_b: -(items_b as f64),
        }
    }

    pub fn points_for(&self, side: Side) -> f64 {
        match side {
            Side::A => self.points_a,
            Side::B => self.points_b,
        }
    }
}

/// One negotiator's record of a finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub succeeded: bool,
    pub my_points: f64,
    pub their_points: f64,
    pub was_a: bool,
    pub did_win: bool,
    pub iterations: usize,
}

impl RoundRecord {
    pub fn from_result(result: &RoundResult, was_a: bool) -> Self {
        let side = if was_a { Side::A } else { Side::B };
        let my_points = result.points_for(side);
        let their_points = result.points_for(side.opponent());
        Self {
            succeeded: result.succeeded,
            my_points,
            their_points,
            was_a,
            did_win: my_points > their_points,
            iterations: result.iterations_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_penalties() {
        let result = RoundResult::exhausted(5, 3, 4);
        assert!(!result.succeeded);
        assert_eq!(result.agreed_offer, None);
        assert_eq!(result.iterations_used, 5);
        assert_eq!(result.points_a, -3.0);
        assert_eq!(result.points_b, -4.0);
    }

    #[test]
    fn test_record_from_b_perspective() {
        let result = RoundResult::agreed(Offer::from(vec!["a"]), 2, 1.0, 3.0);
        let record = RoundRecord::from_result(&result, false);
        assert_eq!(record.my_points, 3.0);
        assert_eq!(record.their_points, 1.0);
        assert!(record.did_win);
        assert!(!record.was_a);
    }
}
