//! Match runner - repeated negotiations and tournaments
//!
//! - `match_runner.rs`: N rounds of one scenario for one strategy pairing
//! - `tournament.rs`: a baseline strategy against a field of opponents over
//!   several scenarios
//! - `transcript.rs`: deterministic fingerprint of a match for replay checks

pub mod match_runner;
pub mod tournament;
pub mod transcript;

pub use match_runner::{MatchConfig, MatchOutcome, MatchRunner, MatchSummary, SideSummary};
pub use tournament::{run_tournament, NamedScenario, ScenarioReport, TournamentReport};
pub use transcript::transcript_hash;
