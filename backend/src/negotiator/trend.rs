//! Trend-following strategy
//!
//! Watches the opponent's reported utility. When the opponent's own utility
//! is falling (it is conceding), the threshold rises; when it is climbing, the
//! threshold relaxes. Counter-offers reshuffle a growing tail of the
//! preference order.

use super::threshold::Trend;
use super::{AgentState, NegotiationError, Negotiator};
use crate::models::Offer;
use crate::rng::RngManager;

/// Trend-based acceptance shared with [`LocalSwap`](super::LocalSwap)
///
/// Needs two opponent readings. An undefined trend leaves the threshold
/// where it is.
pub(crate) fn trend_accepts(state: &mut AgentState, value: f64) -> bool {
    match Trend::from_readings(state.opponent_reported_utilities()) {
        Trend::Insufficient => false,
        Trend::Undefined => value >= state.threshold().current(),
        Trend::Value(trend) => {
            state.record_trend(trend);
            state.threshold_mut().adjust_by_trend(trend);
            value >= state.threshold().current()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrendFollowing {
    state: AgentState,
}

impl TrendFollowing {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Negotiator for TrendFollowing {
    fn name(&self) -> &'static str {
        "TrendFollowing"
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

        let counter = self.state.suffix_reshuffle(rng);
        self.state.commit(counter)
    }
}
