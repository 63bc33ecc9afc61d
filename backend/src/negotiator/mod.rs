//! Negotiator contract and strategy variants
//!
//! # Overview
//!
//! A negotiator is a stateful agent holding a private preference order. Each
//! turn it receives the opponent's latest offer and either accepts it (by
//! returning an identical offer) or counters with a new one. The only thing it
//! ever learns about the opponent, besides the offers themselves, is a scaled
//! utility reading delivered through [`Negotiator::receive_utility`].
//!
//! # Contract
//!
//! All strategies implement the [`Negotiator`] trait:
//!
//! ```rust
//! use negotiation_sim_core::negotiator::{AgentState, NegotiationError, Negotiator};
//! use negotiation_sim_core::models::Offer;
//! use negotiation_sim_core::RngManager;
//!
//! struct Stubborn {
//!     state: AgentState,
//! }
//!
//! impl Negotiator for Stubborn {
//!     fn name(&self) -> &'static str {
//!         "Stubborn"
//!     }
//!
//!     fn state(&self) -> &AgentState {
//!         &self.state
//!     }
//!
//!     fn state_mut(&mut self) -> &mut AgentState {
//!         &mut self.state
//!     }
//!
//!     fn make_offer(
//!         &mut self,
//!         opponent_offer: Option<&Offer>,
//!         _rng: &mut RngManager,
//!     ) -> Result<Offer, NegotiationError> {
//!         if let Some(offer) = opponent_offer {
//!             self.state.observe(offer)?;
//!         }
//!         let own = self.state.preferences().to_offer();
//!         self.state.commit(own)
//!     }
//! }
//! ```
//!
//! # Strategies
//!
//! 1. **StaticRandom**: accept 5% of the time, otherwise shuffle everything
//! 2. **ThresholdLinear**: linearly decaying acceptance threshold
//! 3. **ThresholdAsymptotic**: multiplicative decay plus opponent modelling
//! 4. **LinearThenAsymptotic**: linear for the first half, then asymptotic
//! 5. **TrendFollowing**: threshold follows the opponent's utility trend
//! 6. **Constant**: always re-offers its own preference order
//! 7. **LocalSwap**: trend acceptance, counters by swapping two positions
//! 8. **Opportunist**: casual acceptance, bounded search, last-turn exploits

use crate::models::{Offer, OfferError, PreferenceOrder, RoundResult, ScenarioError, Side};
use crate::rng::RngManager;
use crate::utility::UtilityError;
use thiserror::Error;

pub mod factory;
pub mod opponent;
pub mod state;
pub mod threshold;

mod asymptotic;
mod constant;
mod linear;
mod linear_asymptotic;
mod local_swap;
mod opportunist;
mod random;
mod trend;

pub use asymptotic::ThresholdAsymptotic;
pub use constant::Constant;
pub use factory::StrategyKind;
pub use linear::ThresholdLinear;
pub use linear_asymptotic::LinearThenAsymptotic;
pub use local_swap::LocalSwap;
pub use opportunist::Opportunist;
pub use random::StaticRandom;
pub use state::AgentState;
pub use threshold::{ThresholdSchedule, Trend};
pub use trend::TrendFollowing;

/// Errors raised by negotiators and the negotiation protocol
///
/// A negotiation that fails to converge is NOT an error; it is a
/// `RoundResult` with `succeeded == false`. These variants are contract
/// violations or configuration problems.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NegotiationError {
    #[error("Negotiator has not been initialized")]
    NotInitialized,

    #[error("Iteration limit must be positive")]
    InvalidIterationLimit,

    #[error("Received invalid offer: {0}")]
    InvalidOffer(#[from] OfferError),

    #[error("Side {side:?} produced an invalid offer: {source}")]
    ContractViolation { side: Side, source: OfferError },

    #[error("Utility error: {0}")]
    Utility(#[from] UtilityError),

    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Negotiation strategy
///
/// Implementors own an [`AgentState`] and expose it through `state` /
/// `state_mut`; the bookkeeping methods have default implementations on top
/// of it. Only `make_offer` carries strategy-specific logic.
///
/// # Offer recording
///
/// Every offer returned from `make_offer`, including an acceptance of the
/// opponent's offer, must go through [`AgentState::commit`] so that
/// `utility()` reflects it.
pub trait Negotiator {
    /// Display name of the strategy
    fn name(&self) -> &'static str;

    fn state(&self) -> &AgentState;

    fn state_mut(&mut self) -> &mut AgentState;

    /// Store the preference order and iteration budget for a scenario
    fn initialize(
        &mut self,
        preferences: PreferenceOrder,
        iteration_limit: usize,
    ) -> Result<(), NegotiationError> {
        self.state_mut().initialize(preferences, iteration_limit)
    }

    /// Respond to the opponent's latest offer
    ///
    /// `None` means this is the opening move of the round. Returning an offer
    /// equal to `opponent_offer` accepts it.
    fn make_offer(
        &mut self,
        opponent_offer: Option<&Offer>,
        rng: &mut RngManager,
    ) -> Result<Offer, NegotiationError>;

    /// Utility of the last recorded own offer against own preferences
    fn utility(&self) -> f64 {
        self.state().current_utility()
    }

    /// Scaled utility the opponent reported for its own last offer
    fn receive_utility(&mut self, value: f64) {
        self.state_mut().record_opponent_utility(value);
    }

    /// Round outcome; resets the per-round iteration counter
    fn receive_results(&mut self, result: &RoundResult) {
        self.state_mut().record_result(result);
    }

    fn preferences(&self) -> &PreferenceOrder {
        self.state().preferences()
    }
}

/// Relative closeness test used by the compromise logic:
/// `|a - b|` within `tolerance` of either magnitude.
pub(crate) fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    let diff = (a - b).abs();
    diff <= tolerance * a.abs() || diff <= tolerance * b.abs()
}
