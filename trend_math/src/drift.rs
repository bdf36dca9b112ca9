//! Linear drift extrapolation
//!
//! The drift of a series is the arithmetic mean of its consecutive
//! differences. For `v_1..v_n` this telescopes to `(v_n - v_1) / (n - 1)`,
//! but it is computed from the differences so that rounding behaves the same
//! way for long and short series.

use crate::{ensure_finite, MathError, Result};
use serde::{Deserialize, Serialize};

/// Consecutive differences `v_i - v_{i-1}` of a series.
///
/// Returns an empty vector for fewer than two values.
pub fn differences(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Mean of the consecutive differences of a series.
pub fn average_change(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Average change needs at least 2 observations, got {}",
            values.len()
        )));
    }
    ensure_finite(values)?;

    let diffs = differences(values);
    let average = diffs.iter().sum::<f64>() / diffs.len() as f64;

    if !average.is_finite() {
        return Err(MathError::CalculationError(
            "Average change overflowed".to_string(),
        ));
    }

    Ok(average)
}

/// A fitted linear drift: the last observation and the average step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearDrift {
    last: f64,
    average_change: f64,
    observations: usize,
}

impl LinearDrift {
    /// Fit a drift to at least two finite observations
    pub fn fit(values: &[f64]) -> Result<Self> {
        let average_change = average_change(values)?;

        Ok(Self {
            // average_change already rejected an empty slice
            last: values[values.len() - 1],
            average_change,
            observations: values.len(),
        })
    }

    /// Extrapolated value `step` periods after the last observation.
    ///
    /// The average change is scaled by `growth_factor`. The result is not
    /// clamped.
    pub fn value_at(&self, step: usize, growth_factor: f64) -> f64 {
        self.last + self.average_change * growth_factor * step as f64
    }

    /// Last observed value
    pub fn last(&self) -> f64 {
        self.last
    }

    /// Mean change per period
    pub fn average_change(&self) -> f64 {
        self.average_change
    }

    /// Number of observations the drift was fitted on
    pub fn observations(&self) -> usize {
        self.observations
    }
}
