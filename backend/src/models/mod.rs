//! Domain models for the negotiation simulator

pub mod event;
pub mod offer;
pub mod result;
pub mod scenario;

// Re-exports
pub use event::{EventLog, NegotiationEvent};
pub use offer::{Item, Offer, OfferError, PreferenceOrder};
pub use result::{RoundRecord, RoundResult, Side};
pub use scenario::{ScenarioConfig, ScenarioError, ScenarioItem};
