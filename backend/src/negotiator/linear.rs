//! Threshold-linear strategy
//!
//! # Behavior
//!
//! - Threshold starts at 0.9 × max utility and drops by a fixed step after
//!   every rejection, reaching 0.1 × max utility over the iteration budget
//! - Accepts an offer whose utility strictly exceeds the threshold
//! - On the terminal turn accepts anything above the floor
//! - Counters by reshuffling a growing tail of its preference order

use super::{AgentState, NegotiationError, Negotiator};
use crate::models::Offer;
use crate::rng::RngManager;

#[derive(Debug, Clone, Default)]
pub struct ThresholdLinear {
    state: AgentState,
}

impl ThresholdLinear {
    pub fn new() -> Self {
        Self::default()
    }

    fn accepts(&mut self, value: f64) -> bool {
        if value > self.state.threshold().current() {
            return true;
        }
        self.state.threshold_mut().decay_linear();
        false
    }
}

impl Negotiator for ThresholdLinear {
    fn name(&self) -> &'static str {
        "ThresholdLinear"
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
