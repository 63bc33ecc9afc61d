//! Utility model
//!
//! Scores an ordering relative to a reference order:
//!
//! ```text
//! utility(offer, reference) = Σ_{item} [ N / (pos_offer(item) + 1) − |pos_offer(item) − pos_reference(item)| ]
//! ```
//!
//! where `N` is the length of the reference order and positions are
//! zero-based. Early placement is rewarded; deviation from the reference
//! position is penalised. The score is maximised exactly when the offer equals
//! the reference, at `Σ_{i=0}^{N-1} N / (i + 1)`.
//!
//! All functions here are pure. Negotiators evaluate hypothetical offers
//! through them without touching their recorded current offer.

use crate::models::offer::{Item, Offer, PreferenceOrder};
use std::collections::HashMap;
use thiserror::Error;

/// Failure to score an ordering against a reference order
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UtilityError {
    #[error("Item '{0}' not found in reference order")]
    ItemNotFound(Item),
}

/// Score `offer` against `reference`
///
/// # Errors
/// Returns [`UtilityError::ItemNotFound`] if the offer names an item absent
/// from the reference order.
///
/// # Example
/// ```
/// use negotiation_sim_core::utility::utility;
///
/// let prefs = vec!["x".to_string(), "y".to_string(), "z".to_string()];
/// let score = utility(&prefs, &prefs).unwrap();
/// assert!((score - 5.5).abs() < 1e-9); // 3 + 1.5 + 1
/// ```
pub fn utility(offer: &[Item], reference: &[Item]) -> Result<f64, UtilityError> {
    let total = reference.len() as f64;
    let reference_pos: HashMap<&str, usize> = reference
        .iter()
        .enumerate()
        .map(|(pos, item)| (item.as_str(), pos))
        .collect();

    offer.iter().enumerate().try_fold(0.0, |points, (pos, item)| {
        let ref_pos = reference_pos
            .get(item.as_str())
            .copied()
            .ok_or_else(|| UtilityError::ItemNotFound(item.clone()))?;
        let deviation = (pos as f64 - ref_pos as f64).abs();
        Ok(points + total / (pos as f64 + 1.0) - deviation)
    })
}

/// Score an optional offer against an agent's preferences (`None` scores 0)
pub fn utility_of(
    offer: Option<&Offer>,
    preferences: &PreferenceOrder,
) -> Result<f64, UtilityError> {
    match offer {
        Some(offer) => utility(offer.items(), preferences.items()),
        None => Ok(0.0),
    }
}

/// Best achievable score for an `n`-item universe
pub fn max_utility(n: usize) -> f64 {
    let total = n as f64;
    (0..n).map(|i| total / (i as f64 + 1.0)).sum()
}
