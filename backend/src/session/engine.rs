//! Session Engine
//!
//! Drives turn-taking between two negotiators until they hold structurally
//! identical offers or the iteration budget runs out.
//!
//! # Protocol
//!
//! ```text
//! INIT:
//!   draw scale_a, scale_b ∈ [1, 11] (hidden, fixed for the session)
//!   offer_a = A.make_offer(None)
//! EXCHANGE, for i in 0..iteration_limit:
//!   B.receive_utility(scale_a × A.utility())
//!   offer_b = B.make_offer(offer_a)      → agreement if offer_a == offer_b
//!   A.receive_utility(scale_b × B.utility())
//!   offer_a = A.make_offer(offer_b)      → agreement if offer_a == offer_b
//! EXHAUSTED:
//!   (false, None, iteration_limit)
//! ```
//!
//! B always moves first within an iteration. The first equality wins.
//!
//! # Scoring
//!
//! On agreement each side scores its own (unscaled) utility of the agreed
//! offer. On exhaustion each side scores minus the size of its own item list.
//!
//! # Example
//!
//! ```rust
//! use negotiation_sim_core::negotiator::{Negotiator, ThresholdAsymptotic};
//! use negotiation_sim_core::models::PreferenceOrder;
//! use negotiation_sim_core::session::NegotiationSession;
//! use negotiation_sim_core::RngManager;
//!
//! let prefs = |items: &[&str]| {
//!     PreferenceOrder::new(items.iter().map(|s| s.to_string()).collect()).unwrap()
//! };
//!
//! let mut a = ThresholdAsymptotic::new();
//! let mut b = ThresholdAsymptotic::new();
//! a.initialize(prefs(&["x", "y", "z"]), 50).unwrap();
//! b.initialize(prefs(&["z", "y", "x"]), 50).unwrap();
//!
//! let mut rng = RngManager::new(12345);
//! let mut session = NegotiationSession::new(50, &mut rng).unwrap();
//! let result = session.run(&mut a, &mut b).unwrap();
//! assert!(result.succeeded);
//! ```

use crate::models::{EventLog, NegotiationEvent, Offer, RoundResult, Side};
use crate::negotiator::{NegotiationError, Negotiator};
use crate::rng::RngManager;
use tracing::debug;

/// Smallest hidden utility scale factor
pub const SCALE_MIN: i64 = 1;

/// Largest hidden utility scale factor
pub const SCALE_MAX: i64 = 11;

/// One negotiation between two negotiators
///
/// The session borrows the match's random source; every random draw made by
/// the session or by either negotiator comes from it, so a fixed seed
/// reproduces the whole exchange.
pub struct NegotiationSession<'r> {
    iteration_limit: usize,
    rng: &'r mut RngManager,
    event_log: EventLog,
}

impl<'r> NegotiationSession<'r> {
    /// Create a session with the given iteration budget
    ///
    /// # Errors
    /// [`NegotiationError::InvalidIterationLimit`] if the budget is zero.
    pub fn new(iteration_limit: usize, rng: &'r mut RngManager) -> Result<Self, NegotiationError> {
        if iteration_limit == 0 {
            return Err(NegotiationError::InvalidIterationLimit);
        }
        Ok(Self {
            iteration_limit,
            rng,
            event_log: EventLog::new(),
        })
    }

    /// Events recorded by the last `run`
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Run the protocol to completion
    ///
    /// # Errors
    /// - [`NegotiationError::ContractViolation`] if either side emits an offer
    ///   that is not a permutation of its own preference order
    /// - any error a negotiator raises from `make_offer`
    pub fn run(
        &mut self,
        a: &mut dyn Negotiator,
        b: &mut dyn Negotiator,
    ) -> Result<RoundResult, NegotiationError> {
        self.event_log.clear();

        let scale_a = self.rng.range_inclusive(SCALE_MIN, SCALE_MAX) as f64;
        let scale_b = self.rng.range_inclusive(SCALE_MIN, SCALE_MAX) as f64;
        self.event_log.log(NegotiationEvent::SessionStarted {
            iteration_limit: self.iteration_limit,
            scale_a: scale_a as i64,
            scale_b: scale_b as i64,
        });

        let mut offer_a = a.make_offer(None, self.rng)?;
        check_offer(Side::A, a, &offer_a)?;
        self.event_log.log(NegotiationEvent::OpeningOffer {
            offer: offer_a.clone(),
        });

        for iteration in 0..self.iteration_limit {
            // B responds to A
            let signal = scale_a * a.utility();
            b.receive_utility(signal);
            self.log_signal(iteration, Side::B, signal);

            let offer_b = b.make_offer(Some(&offer_a), self.rng)?;
            check_offer(Side::B, b, &offer_b)?;
            self.log_offer(iteration, Side::B, &offer_b);

            if offer_a == offer_b {
                return Ok(self.agreement(iteration, Side::B, offer_b, a, b));
            }

            // A responds to B
            let signal = scale_b * b.utility();
            a.receive_utility(signal);
            self.log_signal(iteration, Side::A, signal);

            offer_a = a.make_offer(Some(&offer_b), self.rng)?;
            check_offer(Side::A, a, &offer_a)?;
            self.log_offer(iteration, Side::A, &offer_a);

            if offer_a == offer_b {
                return Ok(self.agreement(iteration, Side::A, offer_a, a, b));
            }
        }

        self.event_log.log(NegotiationEvent::Exhausted {
            iteration_limit: self.iteration_limit,
        });
        debug!(
            iteration_limit = self.iteration_limit,
            "negotiation exhausted without agreement"
        );
        Ok(RoundResult::exhausted(
            self.iteration_limit,
            a.preferences().len(),
            b.preferences().len(),
        ))
    }

    fn agreement(
        &mut self,
        iteration: usize,
        closed_by: Side,
        offer: Offer,
        a: &dyn Negotiator,
        b: &dyn Negotiator,
    ) -> RoundResult {
        self.event_log.log(NegotiationEvent::Agreement {
            iteration,
            closed_by,
            offer: offer.clone(),
        });
        debug!(iteration, ?closed_by, "negotiation reached agreement");
        RoundResult::agreed(offer, iteration, a.utility(), b.utility())
    }

    fn log_signal(&mut self, iteration: usize, recipient: Side, value: f64) {
        self.event_log.log(NegotiationEvent::UtilitySignal {
            iteration,
            recipient,
            value,
        });
    }

    fn log_offer(&mut self, iteration: usize, side: Side, offer: &Offer) {
        self.event_log.log(NegotiationEvent::OfferMade {
            iteration,
            side,
            offer: offer.clone(),
        });
    }
}

/// An emitted offer must be a permutation of the emitter's own preferences
fn check_offer(side: Side, negotiator: &dyn Negotiator, offer: &Offer) -> Result<(), NegotiationError> {
    negotiator
        .preferences()
        .validate(offer)
        .map_err(|source| NegotiationError::ContractViolation { side, source })
}

/// Run a single negotiation with a fresh session
pub fn negotiate(
    iteration_limit: usize,
    a: &mut dyn Negotiator,
    b: &mut dyn Negotiator,
    rng: &mut RngManager,
) -> Result<RoundResult, NegotiationError> {
    NegotiationSession::new(iteration_limit, rng)?.run(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PreferenceOrder;
    use crate::negotiator::Constant;

    fn prefs(items: &[&str]) -> PreferenceOrder {
        PreferenceOrder::new(items.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_zero_iteration_limit_rejected() {
        let mut rng = RngManager::new(1);
        assert!(matches!(
            NegotiationSession::new(0, &mut rng),
            Err(NegotiationError::InvalidIterationLimit)
        ));
    }

    #[test]
    fn test_event_log_turn_order() {
        let mut a = Constant::new();
        let mut b = Constant::new();
        a.initialize(prefs(&["x", "y"]), 2).unwrap();
        b.initialize(prefs(&["y", "x"]), 2).unwrap();

        let mut rng = RngManager::new(5);
        let mut session = NegotiationSession::new(2, &mut rng).unwrap();
        let result = session.run(&mut a, &mut b).unwrap();
        assert!(!result.succeeded);

        let types: Vec<&str> = session
            .event_log()
            .events()
            .iter()
            .map(|e| e.event_type())
            .collect();
        assert_eq!(
            types,
            vec![
                "SessionStarted",
                "OpeningOffer",
                "UtilitySignal",
                "OfferMade",
                "UtilitySignal",
                "OfferMade",
                "UtilitySignal",
                "OfferMade",
                "UtilitySignal",
                "OfferMade",
                "Exhausted",
            ]
        );
        assert_eq!(session.event_log().events()[3].side(), Some(Side::B));
    }

    #[test]
    fn test_scales_within_bounds() {
        let mut a = Constant::new();
        let mut b = Constant::new();
        a.initialize(prefs(&["x"]), 1).unwrap();
        b.initialize(prefs(&["x"]), 1).unwrap();

        let mut rng = RngManager::new(17);
        for _ in 0..50 {
            let mut session = NegotiationSession::new(1, &mut rng).unwrap();
            session.run(&mut a, &mut b).unwrap();
            match &session.event_log().events()[0] {
                NegotiationEvent::SessionStarted { scale_a, scale_b, .. } => {
                    assert!((SCALE_MIN..=SCALE_MAX).contains(scale_a));
                    assert!((SCALE_MIN..=SCALE_MAX).contains(scale_b));
                }
                other => panic!("unexpected first event {:?}", other),
            }
        }
    }
}
