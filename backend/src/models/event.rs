//! Event logging for negotiation replay and auditing.
//!
//! Every session records what happened, in order: the hidden scale factors,
//! each utility signal, each offer and the terminal outcome. Events enable:
//! - Debugging (see exactly which turn produced the agreement)
//! - Auditing (check the protocol's turn order)
//! - Analysis (offer trajectories per strategy)
//!
//! # Example
//!
//! ```rust
//! use negotiation_sim_core::models::{NegotiationEvent, Offer, Side};
//!
//! let event = NegotiationEvent::OfferMade {
//!     iteration: 3,
//!     side: Side::B,
//!     offer: Offer::from(vec!["x", "y"]),
//! };
//!
//! assert_eq!(event.iteration(), Some(3));
//! assert_eq!(event.event_type(), "OfferMade");
//! ```

use crate::models::offer::Offer;
use crate::models::result::Side;

/// Negotiation event capturing a protocol step.
#[derive(Debug, Clone, PartialEq)]
pub enum NegotiationEvent {
    /// Session opened; per-side utility scale factors were drawn
    SessionStarted {
        iteration_limit: usize,
        scale_a: i64,
        scale_b: i64,
    },

    /// Opening offer from side A (made with no opposing offer)
    OpeningOffer { offer: Offer },

    /// Scaled utility transmitted to `recipient`
    UtilitySignal {
        iteration: usize,
        recipient: Side,
        value: f64,
    },

    /// Counter-offer (or acceptance) from `side`
    OfferMade {
        iteration: usize,
        side: Side,
        offer: Offer,
    },

    /// Both sides hold the same offer
    Agreement {
        iteration: usize,
        /// Side whose move produced the match
        closed_by: Side,
        offer: Offer,
    },

    /// Iteration budget exhausted without agreement
    Exhausted { iteration_limit: usize },
}

impl NegotiationEvent {
    /// Iteration index, for events that belong to an exchange iteration
    pub fn iteration(&self) -> Option<usize> {
        match self {
            NegotiationEvent::UtilitySignal { iteration, .. } => Some(*iteration),
            NegotiationEvent::OfferMade { iteration, .. } => Some(*iteration),
            NegotiationEvent::Agreement { iteration, .. } => Some(*iteration),
            _ => None,
        }
    }

    /// Short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            NegotiationEvent::SessionStarted { .. } => "SessionStarted",
            NegotiationEvent::OpeningOffer { .. } => "OpeningOffer",
            NegotiationEvent::UtilitySignal { .. } => "UtilitySignal",
            NegotiationEvent::OfferMade { .. } => "OfferMade",
            NegotiationEvent::Agreement { .. } => "Agreement",
            NegotiationEvent::Exhausted { .. } => "Exhausted",
        }
    }

    /// Side the event concerns, if any
    pub fn side(&self) -> Option<Side> {
        match self {
            NegotiationEvent::OpeningOffer { .. } => Some(Side::A),
            NegotiationEvent::UtilitySignal { recipient, .. } => Some(*recipient),
            NegotiationEvent::OfferMade { side, .. } => Some(*side),
            NegotiationEvent::Agreement { closed_by, .. } => Some(*closed_by),
            _ => None,
        }
    }
}

/// Event log for storing and querying negotiation events.
///
/// A simple wrapper around `Vec<NegotiationEvent>` with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<NegotiationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: NegotiationEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[NegotiationEvent] {
        &self.events
    }

    /// Events belonging to one exchange iteration
    pub fn events_at_iteration(&self, iteration: usize) -> Vec<&NegotiationEvent> {
        self.events
            .iter()
            .filter(|e| e.iteration() == Some(iteration))
            .collect()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<&NegotiationEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Offers made by one side, in order (opening offer included for A)
    pub fn offers_by(&self, side: Side) -> Vec<&Offer> {
        self.events
            .iter()
            .filter_map(|e| match e {
                NegotiationEvent::OpeningOffer { offer } if side == Side::A => Some(offer),
                NegotiationEvent::OfferMade { side: s, offer, .. } if *s == side => Some(offer),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offers_by_side_includes_opening() {
        let mut log = EventLog::new();
        log.log(NegotiationEvent::OpeningOffer {
            offer: Offer::from(vec!["a", "b"]),
        });
        log.log(NegotiationEvent::OfferMade {
            iteration: 0,
            side: Side::B,
            offer: Offer::from(vec!["b", "a"]),
        });
        log.log(NegotiationEvent::OfferMade {
            iteration: 0,
            side: Side::A,
            offer: Offer::from(vec!["a", "b"]),
        });

        assert_eq!(log.offers_by(Side::A).len(), 2);
        assert_eq!(log.offers_by(Side::B).len(), 1);
        assert_eq!(log.events_at_iteration(0).len(), 2);
    }

    #[test]
    fn test_events_of_type() {
        let mut log = EventLog::new();
        log.log(NegotiationEvent::Exhausted { iteration_limit: 4 });
        assert_eq!(log.events_of_type("Exhausted").len(), 1);
        assert!(log.events_of_type("Agreement").is_empty());
    }
}
