//! Extrapolation models for a single metric series

use crate::error::{ProjectionError, Result};
use crate::jitter::JitterSource;
use std::fmt::Debug;

pub mod linear_drift;
pub mod pattern_repeat;

pub use linear_drift::{FittedLinearDrift, LinearDriftModel};
pub use pattern_repeat::{FittedPatternRepeat, PatternRepeatModel};

/// Projected values for consecutive future periods
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    values: Vec<f64>,
    horizons: usize,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, horizons: usize) -> Result<Self> {
        if values.len() != horizons {
            return Err(ProjectionError::ValidationError(format!(
                "Values length ({}) doesn't match horizons ({})",
                values.len(),
                horizons
            )));
        }

        Ok(Self { values, horizons })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.horizons
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Floor a projected value at zero; no metric may go negative
pub(crate) fn floor_at_zero(value: f64) -> f64 {
    value.max(0.0)
}

/// A model fitted to one metric's observations
pub trait FittedProjection: Debug {
    /// Project `horizon` periods past the last observation
    fn forecast(&self, horizon: usize, jitter: &mut dyn JitterSource) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// A projection rule that can be fitted to a metric's observations
pub trait ProjectionModel: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedProjection;

    /// Fit the model to chronologically ordered, finite observations
    fn fit(&self, observations: &[f64]) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_result_length_check() {
        let result = ForecastResult::new(vec![1.0, 2.0], 2).unwrap();
        assert_eq!(result.horizons(), 2);
        assert_eq!(result.values(), &[1.0, 2.0]);
        assert_eq!(result.into_values(), vec![1.0, 2.0]);

        assert!(matches!(
            ForecastResult::new(vec![1.0], 2),
            Err(ProjectionError::ValidationError(_))
        ));
    }

    #[test]
    fn test_floor_at_zero() {
        assert_eq!(floor_at_zero(-4.0), 0.0);
        assert_eq!(floor_at_zero(4.0), 4.0);
    }
}
