//! Negotiation session - one complete bilateral negotiation
//!
//! See `engine.rs` for the protocol implementation.

pub mod engine;

pub use engine::{negotiate, NegotiationSession, SCALE_MAX, SCALE_MIN};
