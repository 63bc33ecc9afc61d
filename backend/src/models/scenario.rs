//! Scenario configuration
//!
//! A scenario is an item universe, a rank per item for each side (1 = best)
//! and an iteration budget. Scenarios are validated eagerly, before any
//! negotiation starts.
//!
//! # Formats
//!
//! JSON:
//!
//! ```json
//! {"iteration_limit": 50, "items": [{"name": "x", "rank_a": 1, "rank_b": 3}]}
//! ```
//!
//! CSV (first line is the iteration limit, then `name,rank_a,rank_b` rows):
//!
//! ```text
//! 50
//! x,1,3
//! y,2,2
//! z,3,1
//! ```

use crate::models::offer::{Item, OfferError, PreferenceOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while loading or validating a scenario
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("Iteration limit must be positive")]
    NonPositiveIterationLimit,

    #[error("Scenario has no items")]
    NoItems,

    #[error("Item '{0}' listed more than once")]
    DuplicateItem(String),

    #[error("Rank {rank} assigned to more than one item for side {side}")]
    TiedRank { side: char, rank: u32 },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid JSON scenario: {0}")]
    Json(String),

    #[error("Invalid preference order: {0}")]
    Preferences(#[from] OfferError),
}

/// One item with both sides' ranks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioItem {
    pub name: Item,
    pub rank_a: u32,
    pub rank_b: u32,
}

/// Complete scenario definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Number of exchange iterations before the negotiation fails
    pub iteration_limit: usize,

    /// Item universe with per-side ranks
    pub items: Vec<ScenarioItem>,
}

impl ScenarioConfig {
    /// Build and validate a scenario
    pub fn new(iteration_limit: usize, items: Vec<ScenarioItem>) -> Result<Self, ScenarioError> {
        let config = Self {
            iteration_limit,
            items,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON scenario and validate it
    pub fn from_json(input: &str) -> Result<Self, ScenarioError> {
        let config: Self =
            serde_json::from_str(input).map_err(|e| ScenarioError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a CSV scenario and validate it
    ///
    /// Blank lines are skipped; fields are trimmed.
    pub fn from_csv(input: &str) -> Result<Self, ScenarioError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (line_no, header) = lines.next().ok_or(ScenarioError::NoItems)?;
        let iteration_limit = header.parse::<usize>().map_err(|e| ScenarioError::Parse {
            line: line_no,
            message: format!("iteration limit '{}': {}", header, e),
        })?;

        let mut items = Vec::new();
        for (line_no, line) in lines {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 3 {
                return Err(ScenarioError::Parse {
                    line: line_no,
                    message: format!("expected 3 fields, found {}", fields.len()),
                });
            }
            let parse_rank = |field: &str| {
                field.parse::<u32>().map_err(|e| ScenarioError::Parse {
                    line: line_no,
                    message: format!("rank '{}': {}", field, e),
                })
            };
            items.push(ScenarioItem {
                name: fields[0].to_string(),
                rank_a: parse_rank(fields[1])?,
                rank_b: parse_rank(fields[2])?,
            });
        }

        Self::new(iteration_limit, items)
    }

    /// Check the scenario invariants
    ///
    /// - iteration limit > 0
    /// - at least one item, no duplicate names
    /// - strict total order per side (no tied ranks)
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.iteration_limit == 0 {
            return Err(ScenarioError::NonPositiveIterationLimit);
        }
        if self.items.is_empty() {
            return Err(ScenarioError::NoItems);
        }

        let mut names = HashSet::new();
        for item in &self.items {
            if !names.insert(item.name.as_str()) {
                return Err(ScenarioError::DuplicateItem(item.name.clone()));
            }
        }

        check_ranks('A', self.items.iter().map(|i| i.rank_a))?;
        check_ranks('B', self.items.iter().map(|i| i.rank_b))?;
        Ok(())
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Side A's preference order (ascending rank)
    pub fn preference_order_a(&self) -> Result<PreferenceOrder, ScenarioError> {
        self.preference_order(|item| item.rank_a)
    }

    /// Side B's preference order (ascending rank)
    pub fn preference_order_b(&self) -> Result<PreferenceOrder, ScenarioError> {
        self.preference_order(|item| item.rank_b)
    }

    fn preference_order<F>(&self, rank: F) -> Result<PreferenceOrder, ScenarioError>
    where
        F: Fn(&ScenarioItem) -> u32,
    {
        let mut ranked: Vec<&ScenarioItem> = self.items.iter().collect();
        ranked.sort_by_key(|item| rank(item));
        let order = ranked.into_iter().map(|item| item.name.clone()).collect();
        Ok(PreferenceOrder::new(order)?)
    }
}

fn check_ranks(side: char, ranks: impl Iterator<Item = u32>) -> Result<(), ScenarioError> {
    let mut seen = HashSet::new();
    for rank in ranks {
        if !seen.insert(rank) {
            return Err(ScenarioError::TiedRank { side, rank });
        }
    }
    Ok(())
}
