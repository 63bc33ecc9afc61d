//! Static-random strategy
//!
//! Baseline for comparison with the adaptive strategies.
//!
//! # Behavior
//!
//! - Opens with its own preference order
//! - Accepts the opponent's offer with a fixed 5% probability
//! - Otherwise counters with a full random shuffle of its preferences

use super::{AgentState, NegotiationError, Negotiator};
use crate::models::Offer;
use crate::rng::RngManager;

/// Probability of accepting any given offer
pub const ACCEPT_PROBABILITY: f64 = 0.05;

#[derive(Debug, Clone, Default)]
pub struct StaticRandom {
    state: AgentState,
}

impl StaticRandom {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Negotiator for StaticRandom {
    fn name(&self) -> &'static str {
        "StaticRandom"
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

        self.state.observe(offer)?;
        if rng.next_f64() < ACCEPT_PROBABILITY {
            return self.state.commit(offer.clone());
        }

        let counter = self.state.full_shuffle(rng);
        self.state.commit(counter)
    }
}
