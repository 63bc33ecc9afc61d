//! Local-swap strategy
//!
//! Same trend-following acceptance as [`TrendFollowing`](super::TrendFollowing),
//! but counters with a small perturbation: two uniformly random positions of
//! its own previous offer are swapped (possibly the same position, which
//! repeats the offer).

use super::trend::trend_accepts;
use super::{AgentState, NegotiationError, Negotiator};
use crate::models::Offer;
use crate::rng::RngManager;

#[derive(Debug, Clone, Default)]
pub struct LocalSwap {
    state: AgentState,
}

impl LocalSwap {
    pub fn new() -> Self {
        Self::default()
    }

    fn perturbed_offer(&self, rng: &mut RngManager) -> Offer {
        match self.state.own_offers().last() {
            Some(previous) => {
                let mut ordering = previous.clone();
                let first = rng.index(ordering.len());
                let second = rng.index(ordering.len());
                ordering.swap(first, second);
                ordering
            }
            None => self.state.preferences().to_offer(),
        }
    }
}

impl Negotiator for LocalSwap {
    fn name(&self) -> &'static str {
        "LocalSwap"
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
        if trend_accepts(&mut self.state, value) {
            return self.state.commit(offer.clone());
        }

        let counter = self.perturbed_offer(rng);
        self.state.commit(counter)
    }
}
