//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in a negotiation (utility scale factors, shuffles,
//! local swaps, bounded searches) MUST go through this module.

mod xorshift;

pub use xorshift::RngManager;
