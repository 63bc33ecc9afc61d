//! Threshold-asymptotic strategy with opponent modelling
//!
//! # Behavior
//!
//! - Threshold starts at 0.9 × max utility and decays multiplicatively
//!   (× 0.9 / iterations), snapping to the floor of 0.1 × max utility
//! - Accepts an offer that is a fair compromise: own utility at least the
//!   estimated opponent utility, the two within 35% of each other, and not
//!   below `-|items|`
//! - Accepts anything above the threshold, or above the floor once the
//!   opponent has been judged aggressive
//! - Against an aggressive opponent, counters with a bounded random search
//!   for a compromise offer; otherwise reshuffles a growing tail of its
//!   preferences
//! - On the terminal turn as side B, exploits an opponent that has always
//!   given in at the end by re-offering its full preferences

use super::opponent::{
    expected_opponent_utility, opponent_always_accepts_last, opponent_is_aggressive,
};
use super::{within_tolerance, AgentState, NegotiationError, Negotiator};
use crate::models::Offer;
use crate::rng::RngManager;

/// Maximum shuffles tried when searching for a compromise offer
pub const COMPROMISE_SEARCH_LIMIT: usize = 1000;

/// Relative gap accepted between own and estimated opponent utility
const ACCEPT_TOLERANCE: f64 = 0.35;

/// Relative gap targeted by the compromise search
const SEARCH_TOLERANCE: f64 = 0.30;

#[derive(Debug, Clone, Default)]
pub struct ThresholdAsymptotic {
    state: AgentState,
}

impl ThresholdAsymptotic {
    pub fn new() -> Self {
        Self::default()
    }

    fn accepts(&mut self, offer: &Offer, value: f64) -> Result<bool, NegotiationError> {
        let theirs = expected_opponent_utility(&self.state, offer)?;
        let worst = -(self.state.item_count() as f64);
        if within_tolerance(value, theirs, ACCEPT_TOLERANCE) && value >= theirs && value > worst {
            return Ok(true);
        }

        let threshold = *self.state.threshold();
        if value > threshold.current() {
            return Ok(true);
        }
        if opponent_is_aggressive(&self.state) && value > threshold.floor() {
            return Ok(true);
        }

        let iterations = self.state.iterations();
        self.state.threshold_mut().decay_asymptotic(iterations);
        Ok(false)
    }

    /// Random search for an offer that is good for us but close to what the
    /// opponent appears to want
    fn compromise_offer(&self, rng: &mut RngManager) -> Result<Option<Offer>, NegotiationError> {
        for _ in 0..COMPROMISE_SEARCH_LIMIT {
            let candidate = self.state.full_shuffle(rng);
            let mine = self.state.evaluate(&candidate)?;
            let theirs = expected_opponent_utility(&self.state, &candidate)?;
            if within_tolerance(mine, theirs, SEARCH_TOLERANCE) && mine >= theirs && mine >= 0.0 {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}

impl Negotiator for ThresholdAsymptotic {
    fn name(&self) -> &'static str {
        "ThresholdAsymptotic"
    }

    fn state(&self) -> &AgentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AgentState {
        &mut self.state
    }

    fn make_offer(
        &mut self,
        opponent_offer: Option<&Offer>,
        rng: &mut RngManager,
    ) -> Result<Offer, NegotiationError> {
        let offer = match opponent_offer {
            None => return self.state.open(),
            Some(offer) => offer,
        };

        if self.state.iterations() == 0 {
            self.state.reset_threshold();
        }
        let value = self.state.observe(offer)?;

        if self.state.is_terminal() {
            if !self.state.was_a() && opponent_always_accepts_last(&self.state) {
                let own = self.state.preferences().to_offer();
                return self.state.commit(own);
            }
            if value > self.state.threshold().floor() {
                return self.state.commit(offer.clone());
            }
        }

        if self.accepts(offer, value)? {
            return self.state.commit(offer.clone());
        }

        let counter = if opponent_is_aggressive(&self.state) {
            match self.compromise_offer(rng)? {
                Some(candidate) => candidate,
                None => self.state.suffix_reshuffle(rng),
            }
        } else {
            self.state.suffix_reshuffle(rng)
        };
        self.state.commit(counter)
    }
}
