//! Opportunist strategy
//!
//! # Behavior
//!
//! - Casual acceptance: utility at least `max × (1 − iterations / limit)`
//! - Counters with a bounded random search for an offer worth more than 40%
//!   of its maximum utility, falling back to its own preferences
//! - Terminal turn as side B: exploit an opponent that always gives in at the
//!   end, otherwise play a "friendly" offer (the opponent's best offer so far
//!   with our favourite item moved to the front) unless the opponent's offer
//!   is better still
//! - Terminal turn as side A: accept any offer with positive utility

use super::opponent::{best_opponent_offer, opponent_always_accepts_last};
use super::{AgentState, NegotiationError, Negotiator};
use crate::models::Offer;
use crate::rng::RngManager;

/// Maximum shuffles tried when searching for a counter-offer
pub const SEARCH_LIMIT: usize = 1000;

/// Minimum share of max utility a searched counter-offer must exceed
const SEARCH_FRACTION: f64 = 0.4;

#[derive(Debug, Clone, Default)]
pub struct Opportunist {
    state: AgentState,
}

impl Opportunist {
    pub fn new() -> Self {
        Self::default()
    }

    fn accepts_casually(&self, value: f64) -> bool {
        let share = 1.0 - self.state.iterations() as f64 * self.state.scaling_factor();
        value >= self.state.max_utility() * share
    }

    fn search_offer(&self, rng: &mut RngManager) -> Result<Offer, NegotiationError> {
        let target = SEARCH_FRACTION * self.state.max_utility();
        for _ in 0..SEARCH_LIMIT {
            let candidate = self.state.full_shuffle(rng);
            if self.state.evaluate(&candidate)? > target {
                return Ok(candidate);
            }
        }
        Ok(self.state.preferences().to_offer())
    }

    fn friendly_offer(&self) -> Offer {
        let mut offer = best_opponent_offer(&self.state)
            .cloned()
            .unwrap_or_else(|| self.state.preferences().to_offer());
        if let Some(favorite) = self.state.preferences().favorite() {
            offer.promote_to_front(favorite);
        }
        offer
    }

    fn terminal_move(&mut self, offer: &Offer, value: f64) -> Result<Option<Offer>, NegotiationError> {
        if self.state.was_a() {
            if value > 0.0 {
                return self.state.commit(offer.clone()).map(Some);
            }
            return Ok(None);
        }

        if opponent_always_accepts_last(&self.state) {
            let own = self.state.preferences().to_offer();
            return self.state.commit(own).map(Some);
        }

        let friendly = self.friendly_offer();
        let chosen = if value > self.state.evaluate(&friendly)? {
            offer.clone()
        } else {
            friendly
        };
        self.state.commit(chosen).map(Some)
    }
}

impl Negotiator for Opportunist {
    fn name(&self) -> &'static str {
        "Opportunist"
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

        let value = self.state.observe(offer)?;

        if self.state.is_terminal() {
            if let Some(final_offer) = self.terminal_move(offer, value)? {
                return Ok(final_offer);
            }
        }
        if self.accepts_casually(value) {
            return self.state.commit(offer.clone());
        }

        let counter = self.search_offer(rng)?;
        self.state.commit(counter)
    }
}
