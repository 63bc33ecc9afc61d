//! Constant strategy
//!
//! Never concedes: every turn, including the opening, re-offers its own
//! preference order verbatim. Agreement only happens if the opponent gives in
//! completely.

use super::{AgentState, NegotiationError, Negotiator};
use crate::models::Offer;
use crate::rng::RngManager;

#[derive(Debug, Clone, Default)]
pub struct Constant {
    state: AgentState,
}

impl Constant {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Negotiator for Constant {
    fn name(&self) -> &'static str {
        "Constant"
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
        _rng: &mut RngManager,
    ) -> Result<Offer, NegotiationError> {
        match opponent_offer {
            None => self.state.open(),
            Some(offer) => {
                self.state.observe(offer)?;
                let own = self.state.preferences().to_offer();
                self.state.commit(own)
            }
        }
    }
}
