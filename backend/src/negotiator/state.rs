//! Per-agent negotiation state
//!
//! # Reset semantics
//!
//! - `receive_results` resets the per-round iteration counter and the
//!   "was A" flag.
//! - `initialize` starts a new scenario: offer and utility histories are
//!   cleared because they name the previous scenario's items.
//! - Trend and round-result histories are retained for the lifetime of the
//!   negotiator; strategies learn across rounds and scenarios from them.

use super::threshold::ThresholdSchedule;
use super::NegotiationError;
use crate::models::{Offer, OfferError, PreferenceOrder, RoundRecord, RoundResult};
use crate::rng::RngManager;
use crate::utility::utility;

/// State owned by exactly one negotiator
#[derive(Debug, Clone, Default)]
pub struct AgentState {
    preferences: PreferenceOrder,
    iteration_limit: usize,

    /// Responses made this round (reset by `record_result`)
    iterations: usize,

    current_offer: Option<Offer>,
    current_utility: f64,

    /// Utility of offering exactly one's own preference order
    max_utility: f64,

    /// `1 / iteration_limit`
    scaling_factor: f64,

    /// `|items| / iteration_limit`; controls how much of the preference
    /// suffix gets reshuffled in counter-offers
    relax_factor: f64,

    /// Set when this agent made the opening offer of the current round
    was_a: bool,

    opponent_offers: Vec<Offer>,
    /// Own utility of each opponent offer, aligned with `opponent_offers`
    opponent_offer_utilities: Vec<f64>,
    /// Scaled utilities reported through the utility channel
    opponent_reported_utilities: Vec<f64>,

    own_offers: Vec<Offer>,
    own_utilities: Vec<f64>,

    threshold: ThresholdSchedule,
    trends: Vec<f64>,
    past_results: Vec<RoundRecord>,
}

impl AgentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preferences and derive the scenario-level parameters
    pub fn initialize(
        &mut self,
        preferences: PreferenceOrder,
        iteration_limit: usize,
    ) -> Result<(), NegotiationError> {
        if iteration_limit == 0 {
            return Err(NegotiationError::InvalidIterationLimit);
        }
        if preferences.is_empty() {
            return Err(OfferError::Empty.into());
        }

        let limit = iteration_limit as f64;
        self.max_utility = utility(preferences.items(), preferences.items())?;
        self.scaling_factor = 1.0 / limit;
        self.relax_factor = preferences.len() as f64 / limit;
        self.preferences = preferences;
        self.iteration_limit = iteration_limit;
        self.iterations = 0;
        self.was_a = false;
        self.current_offer = None;
        self.current_utility = 0.0;
        self.opponent_offers.clear();
        self.opponent_offer_utilities.clear();
        self.opponent_reported_utilities.clear();
        self.own_offers.clear();
        self.own_utilities.clear();
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.iteration_limit > 0
    }

    fn ensure_initialized(&self) -> Result<(), NegotiationError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(NegotiationError::NotInitialized)
        }
    }

    // ========================================================================
    // Turn handling
    // ========================================================================

    /// Opening move: mark this agent as side A and offer the full preference
    /// order
    pub fn open(&mut self) -> Result<Offer, NegotiationError> {
        self.ensure_initialized()?;
        self.was_a = true;
        let offer = self.preferences.to_offer();
        self.commit(offer)
    }

    /// Record the opponent's offer and advance the iteration counter
    ///
    /// Returns the offer's utility against own preferences.
    ///
    /// # Errors
    /// [`NegotiationError::InvalidOffer`] if the offer is not a permutation of
    /// own preference order.
    pub fn observe(&mut self, offer: &Offer) -> Result<f64, NegotiationError> {
        self.ensure_initialized()?;
        self.preferences.validate(offer)?;
        let value = self.evaluate(offer)?;
        self.opponent_offers.push(offer.clone());
        self.opponent_offer_utilities.push(value);
        self.iterations += 1;
        Ok(value)
    }

    /// Make `offer` the current offer and append it to the own history
    pub fn commit(&mut self, offer: Offer) -> Result<Offer, NegotiationError> {
        let value = self.evaluate(&offer)?;
        self.own_offers.push(offer.clone());
        self.own_utilities.push(value);
        self.current_offer = Some(offer.clone());
        self.current_utility = value;
        Ok(offer)
    }

    /// Utility of a hypothetical offer against own preferences
    ///
    /// Pure: the recorded current offer is left untouched.
    pub fn evaluate(&self, offer: &Offer) -> Result<f64, NegotiationError> {
        Ok(utility(offer.items(), self.preferences.items())?)
    }

    /// True on the last response the iteration budget allows
    pub fn is_terminal(&self) -> bool {
        self.iterations >= self.iteration_limit
    }

    /// Own preference order with a tail of `floor(relax × iterations) + 1`
    /// items shuffled; the preferred prefix stays in place
    pub fn suffix_reshuffle(&self, rng: &mut RngManager) -> Offer {
        let mut ordering = self.preferences.to_offer();
        let len = ordering.len();
        let relax = (self.relax_factor * self.iterations as f64) as usize + 1;
        let start = len - relax.min(len);
        rng.shuffle(&mut ordering.items_mut()[start..]);
        ordering
    }

    /// Own preference order, fully shuffled
    pub fn full_shuffle(&self, rng: &mut RngManager) -> Offer {
        let mut ordering = self.preferences.to_offer();
        rng.shuffle(ordering.items_mut());
        ordering
    }

    pub fn record_opponent_utility(&mut self, value: f64) {
        self.opponent_reported_utilities.push(value);
    }

    pub fn record_trend(&mut self, trend: f64) {
        self.trends.push(trend);
    }

    /// Log the round outcome from this agent's perspective and start a new
    /// round
    pub fn record_result(&mut self, result: &RoundResult) {
        self.past_results
            .push(RoundRecord::from_result(result, self.was_a));
        self.iterations = 0;
        self.was_a = false;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn preferences(&self) -> &PreferenceOrder {
        &self.preferences
    }

    pub fn item_count(&self) -> usize {
        self.preferences.len()
    }

    pub fn iteration_limit(&self) -> usize {
        self.iteration_limit
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn current_offer(&self) -> Option<&Offer> {
        self.current_offer.as_ref()
    }

    pub fn current_utility(&self) -> f64 {
        self.current_utility
    }

    pub fn max_utility(&self) -> f64 {
        self.max_utility
    }

    pub fn scaling_factor(&self) -> f64 {
        self.scaling_factor
    }

    pub fn relax_factor(&self) -> f64 {
        self.relax_factor
    }

    pub fn was_a(&self) -> bool {
        self.was_a
    }

    pub fn opponent_offers(&self) -> &[Offer] {
        &self.opponent_offers
    }

    pub fn opponent_offer_utilities(&self) -> &[f64] {
        &self.opponent_offer_utilities
    }

    pub fn opponent_reported_utilities(&self) -> &[f64] {
        &self.opponent_reported_utilities
    }

    pub fn own_offers(&self) -> &[Offer] {
        &self.own_offers
    }

    pub fn own_utilities(&self) -> &[f64] {
        &self.own_utilities
    }

    pub fn threshold(&self) -> &ThresholdSchedule {
        &self.threshold
    }

    pub fn threshold_mut(&mut self) -> &mut ThresholdSchedule {
        &mut self.threshold
    }

    /// Re-arm the threshold schedule from this agent's maximum utility
    pub fn reset_threshold(&mut self) {
        let (max_utility, limit) = (self.max_utility, self.iteration_limit);
        self.threshold.reset(max_utility, limit);
    }

    pub fn trends(&self) -> &[f64] {
        &self.trends
    }

    pub fn past_results(&self) -> &[RoundRecord] {
        &self.past_results
    }
}
