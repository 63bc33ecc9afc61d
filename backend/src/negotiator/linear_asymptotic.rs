//! Linear-then-asymptotic strategy
//!
//! Concedes steadily for the first half of the iteration budget, then decays
//! the threshold with a squared denominator so it collapses quickly towards
//! the floor. Counter-offers reshuffle a growing tail of the preference order.

use super::{AgentState, NegotiationError, Negotiator};
use crate::models::Offer;
use crate::rng::RngManager;

#[derive(Debug, Clone, Default)]
pub struct LinearThenAsymptotic {
    state: AgentState,
}

impl LinearThenAsymptotic {
    pub fn new() -> Self {
        Self::default()
    }

    fn in_linear_phase(&self) -> bool {
        self.state.iterations() as f64 <= self.state.iteration_limit() as f64 / 2.0
    }

    fn accepts(&mut self, value: f64) -> bool {
        if value > self.state.threshold().current() {
            return true;
        }

        let iterations = self.state.iterations();
        if self.in_linear_phase() {
            self.state.threshold_mut().decay_linear();
        } else {
            self.state.threshold_mut().decay_asymptotic_squared(iterations);
        }
        false
    }
}

impl Negotiator for LinearThenAsymptotic {
    fn name(&self) -> &'static str {
        "LinearThenAsymptotic"
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

        if self.state.is_terminal() && value > self.state.threshold().floor() {
            return self.state.commit(offer.clone());
        }
        if self.accepts(value) {
            return self.state.commit(offer.clone());
        }

        let counter = self.state.suffix_reshuffle(rng);
        self.state.commit(counter)
    }
}
