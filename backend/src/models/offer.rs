//! Offer and preference-order model
//!
//! An offer is a full ordering of the item universe proposed by one side in
//! one turn. A preference order is an agent's private total ranking of the
//! same universe, best first.
//!
//! CRITICAL: Every offer exchanged during a negotiation must be a permutation
//! of the issuing agent's preference order. Anything else is a contract
//! violation, never a "failed negotiation".

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Opaque item identifier
pub type Item = String;

/// Errors raised when an ordering is not a permutation of the item universe
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OfferError {
    #[error("Preference order is empty")]
    Empty,

    #[error("Item '{0}' appears more than once")]
    DuplicateItem(Item),

    #[error("Item '{0}' is not part of the item universe")]
    UnknownItem(Item),

    #[error("Offer has {actual} items, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// An ordered proposal of all items, most-favoured first
///
/// Agreement between two agents is plain value equality: same length, same
/// items, same order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Offer(Vec<Item>);

impl Offer {
    pub fn new(items: Vec<Item>) -> Self {
        Self(items)
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Zero-based position of `item`, if present
    pub fn position(&self, item: &str) -> Option<usize> {
        self.0.iter().position(|i| i == item)
    }

    /// Swap the items at two positions (a no-op when `i == j`)
    pub fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }

    pub(crate) fn items_mut(&mut self) -> &mut [Item] {
        &mut self.0
    }

    /// Move `item` to the front, keeping the relative order of the others
    pub fn promote_to_front(&mut self, item: &str) {
        if let Some(pos) = self.position(item) {
            let promoted = self.0.remove(pos);
            self.0.insert(0, promoted);
        }
    }
}

impl From<Vec<&str>> for Offer {
    fn from(items: Vec<&str>) -> Self {
        Self(items.into_iter().map(str::to_string).collect())
    }
}

/// An agent's private total order over the item universe
///
/// Constructed once per scenario and immutable afterwards. The `Default`
/// value is the empty order held by a negotiator before `initialize`.
///
/// # Example
/// ```
/// use negotiation_sim_core::models::{Offer, PreferenceOrder};
///
/// let prefs = PreferenceOrder::new(vec!["x".into(), "y".into(), "z".into()]).unwrap();
/// assert!(prefs.validate(&Offer::from(vec!["z", "x", "y"])).is_ok());
/// assert!(prefs.validate(&Offer::from(vec!["x", "x", "y"])).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Item>", into = "Vec<Item>")]
pub struct PreferenceOrder(Vec<Item>);

impl PreferenceOrder {
    /// Build a preference order, rejecting empty or duplicated universes
    pub fn new(items: Vec<Item>) -> Result<Self, OfferError> {
        if items.is_empty() {
            return Err(OfferError::Empty);
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.as_str()) {
                return Err(OfferError::DuplicateItem(item.clone()));
            }
        }
        Ok(Self(items))
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most-preferred item
    pub fn favorite(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// The preference order itself, as an offer
    pub fn to_offer(&self) -> Offer {
        Offer(self.0.clone())
    }

    /// Check that `offer` is a permutation of this universe
    pub fn validate(&self, offer: &Offer) -> Result<(), OfferError> {
        if offer.len() != self.len() {
            return Err(OfferError::LengthMismatch {
                expected: self.len(),
                actual: offer.len(),
            });
        }
        let universe: HashSet<&str> = self.0.iter().map(String::as_str).collect();
        let mut seen = HashSet::with_capacity(offer.len());
        for item in offer.items() {
            if !universe.contains(item.as_str()) {
                return Err(OfferError::UnknownItem(item.clone()));
            }
            if !seen.insert(item.as_str()) {
                return Err(OfferError::DuplicateItem(item.clone()));
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<Item>> for PreferenceOrder {
    type Error = OfferError;

    fn try_from(items: Vec<Item>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl From<PreferenceOrder> for Vec<Item> {
    fn from(order: PreferenceOrder) -> Self {
        order.0
    }
}
