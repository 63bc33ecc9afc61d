//! Adaptive acceptance thresholds
//!
//! A [`ThresholdSchedule`] is re-armed at the first response of each round at
//! `0.9 × max_utility` and may only move inside
//! `[0.1 × max_utility, 0.9 × max_utility]`. Every mutation clamps into
//! that interval.

use tracing::warn;

/// Fraction of the maximum utility the threshold starts at
pub const CEILING_FRACTION: f64 = 0.9;

/// Fraction of the maximum utility the threshold may never drop below
pub const FLOOR_FRACTION: f64 = 0.1;

/// Trend readings at or beyond this magnitude are ignored
pub const TREND_CUTOFF: f64 = 0.99;

/// Decaying acceptance threshold
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThresholdSchedule {
    ceiling: f64,
    floor: f64,
    step: f64,
    current: f64,
}

impl ThresholdSchedule {
    /// Re-arm for a new round
    ///
    /// The linear step spreads `ceiling - floor` evenly over the iteration
    /// budget.
    pub fn reset(&mut self, max_utility: f64, iteration_limit: usize) {
        self.ceiling = CEILING_FRACTION * max_utility;
        self.floor = FLOOR_FRACTION * max_utility;
        self.step = if iteration_limit == 0 {
            0.0
        } else {
            (self.ceiling - self.floor) / iteration_limit as f64
        };
        self.current = self.ceiling;
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Subtract one linear step
    pub fn decay_linear(&mut self) {
        self.set(self.current - self.step);
    }

    /// Multiplicative decay: `current × 0.9 / iterations`, snapping to the
    /// floor once `current / iterations` would fall below it
    pub fn decay_asymptotic(&mut self, iterations: usize) {
        self.decay_by(iterations.max(1) as f64);
    }

    /// Like [`decay_asymptotic`](Self::decay_asymptotic) with a squared
    /// denominator
    pub fn decay_asymptotic_squared(&mut self, iterations: usize) {
        let n = iterations.max(1) as f64;
        self.decay_by(n * n);
    }

    /// Lower (or raise) the threshold proportionally to the opponent's trend
    ///
    /// Returns false when the trend was too large to be trusted and was
    /// ignored.
    pub fn adjust_by_trend(&mut self, trend: f64) -> bool {
        if trend.abs() < TREND_CUTOFF {
            self.set(self.current - self.current * trend);
            true
        } else {
            false
        }
    }

    fn decay_by(&mut self, denominator: f64) {
        if self.current / denominator < self.floor {
            self.current = self.floor;
        } else {
            self.set(self.current * CEILING_FRACTION / denominator);
        }
    }

    fn set(&mut self, value: f64) {
        self.current = value.max(self.floor).min(self.ceiling);
    }
}

/// Relative change between the two latest opponent utility readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trend {
    /// Fewer than two readings
    Insufficient,

    /// The previous reading was exactly zero
    Undefined,

    /// `(latest - previous) / previous`
    Value(f64),
}

impl Trend {
    /// Compute the trend from an ordered reading history
    ///
    /// A zero previous reading has no relative change; it is reported as
    /// [`Trend::Undefined`] and logged rather than coerced to a number.
    pub fn from_readings(readings: &[f64]) -> Self {
        match readings {
            [.., previous, latest] => {
                if *previous == 0.0 {
                    warn!(
                        latest = *latest,
                        "opponent utility trend undefined: previous reading is zero"
                    );
                    Trend::Undefined
                } else {
                    Trend::Value((latest - previous) / previous)
                }
            }
            _ => Trend::Insufficient,
        }
    }
}
