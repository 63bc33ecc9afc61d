//! Strategy selection
//!
//! [`StrategyKind`] names every built-in strategy; [`StrategyKind::build`] is
//! the factory the match runner and CLI use to create fresh negotiators.
//!
//! ```rust
//! use negotiation_sim_core::negotiator::{Negotiator, StrategyKind};
//!
//! let kind: StrategyKind = "threshold_asymptotic".parse().unwrap();
//! let negotiator = kind.build();
//! assert_eq!(negotiator.name(), "ThresholdAsymptotic");
//! ```

use super::{
    Constant, LinearThenAsymptotic, LocalSwap, NegotiationError, Negotiator, Opportunist,
    StaticRandom, ThresholdAsymptotic, ThresholdLinear, TrendFollowing,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    StaticRandom,
    ThresholdLinear,
    ThresholdAsymptotic,
    LinearThenAsymptotic,
    TrendFollowing,
    Constant,
    LocalSwap,
    Opportunist,
}

impl StrategyKind {
    /// Every built-in strategy, in tournament order
    pub const ALL: [StrategyKind; 8] = [
        StrategyKind::Opportunist,
        StrategyKind::StaticRandom,
        StrategyKind::ThresholdLinear,
        StrategyKind::ThresholdAsymptotic,
        StrategyKind::LinearThenAsymptotic,
        StrategyKind::TrendFollowing,
        StrategyKind::Constant,
        StrategyKind::LocalSwap,
    ];

    /// Configuration key (snake_case)
    pub fn key(self) -> &'static str {
        match self {
            StrategyKind::StaticRandom => "static_random",
            StrategyKind::ThresholdLinear => "threshold_linear",
            StrategyKind::ThresholdAsymptotic => "threshold_asymptotic",
            StrategyKind::LinearThenAsymptotic => "linear_then_asymptotic",
            StrategyKind::TrendFollowing => "trend_following",
            StrategyKind::Constant => "constant",
            StrategyKind::LocalSwap => "local_swap",
            StrategyKind::Opportunist => "opportunist",
        }
    }

    /// Create a fresh, uninitialized negotiator
    pub fn build(self) -> Box<dyn Negotiator> {
        match self {
            StrategyKind::StaticRandom => Box::new(StaticRandom::new()),
            StrategyKind::ThresholdLinear => Box::new(ThresholdLinear::new()),
            StrategyKind::ThresholdAsymptotic => Box::new(ThresholdAsymptotic::new()),
            StrategyKind::LinearThenAsymptotic => Box::new(LinearThenAsymptotic::new()),
            StrategyKind::TrendFollowing => Box::new(TrendFollowing::new()),
            StrategyKind::Constant => Box::new(Constant::new()),
            StrategyKind::LocalSwap => Box::new(LocalSwap::new()),
            StrategyKind::Opportunist => Box::new(Opportunist::new()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StrategyKind {
    type Err = NegotiationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| NegotiationError::InvalidConfig(format!("unknown strategy '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_round_trips_through_key() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.key().parse::<StrategyKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(matches!(
            "greedy".parse::<StrategyKind>(),
            Err(NegotiationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&StrategyKind::LinearThenAsymptotic).unwrap();
        assert_eq!(json, "\"linear_then_asymptotic\"");
    }
}
