//! Negotiation Simulator Core - Rust Engine
//!
//! Heuristic bilateral negotiation over orderings of items with
//! deterministic execution.
//!
//! # Architecture
//!
//! - **models**: Domain types (Offer, PreferenceOrder, Scenario, RoundResult, events)
//! - **utility**: Position-weighted utility of an ordering
//! - **negotiator**: The negotiator contract and the built-in strategies
//! - **session**: Alternating-offer protocol for one negotiation
//! - **runner**: Repeated rounds, tournaments and transcript hashing
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Every offer exchanged is a permutation of the scenario's items
//! 2. All randomness is deterministic (seeded RNG threaded explicitly)
//! 3. Utility readings shown to an opponent are scaled by a private factor

// Module declarations
pub mod models;
pub mod negotiator;
pub mod rng;
pub mod runner;
pub mod session;
pub mod utility;

// Re-exports for convenience
pub use models::{
    event::{EventLog, NegotiationEvent},
    offer::{Item, Offer, OfferError, PreferenceOrder},
    result::{RoundRecord, RoundResult, Side},
    scenario::{ScenarioConfig, ScenarioError, ScenarioItem},
};
pub use negotiator::{AgentState, NegotiationError, Negotiator, StrategyKind};
pub use rng::RngManager;
pub use runner::{
    run_tournament, transcript_hash, MatchConfig, MatchOutcome, MatchRunner, MatchSummary,
    NamedScenario, ScenarioReport, SideSummary, TournamentReport,
};
pub use session::{negotiate, NegotiationSession};
pub use utility::{max_utility, utility, UtilityError};
