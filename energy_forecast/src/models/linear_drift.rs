//! Linear drift projection
//!
//! Step `k` is `max(0, v_n + average_change * growth_factor * k)`, where
//! `average_change` is the mean of consecutive differences of the
//! observations.

use crate::error::{ProjectionError, Result};
use crate::jitter::JitterSource;
use crate::models::{floor_at_zero, FittedProjection, ForecastResult, ProjectionModel};
use trend_math::{LinearDrift, MathError};

/// Linear drift model with a growth multiplier
#[derive(Debug, Clone)]
pub struct LinearDriftModel {
    name: String,
    growth_factor: f64,
}

/// Linear drift fitted to one metric
#[derive(Debug, Clone)]
pub struct FittedLinearDrift {
    name: String,
    growth_factor: f64,
    drift: LinearDrift,
}

impl LinearDriftModel {
    /// Create a new linear drift model
    pub fn new(growth_factor: f64) -> Result<Self> {
        if !growth_factor.is_finite() {
            return Err(ProjectionError::InvalidParameter(
                "Growth factor must be finite".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Linear Drift (growth={})", growth_factor),
            growth_factor,
        })
    }

    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }
}

impl ProjectionModel for LinearDriftModel {
    type Fitted = FittedLinearDrift;

    fn fit(&self, observations: &[f64]) -> Result<Self::Fitted> {
        let drift = LinearDrift::fit(observations)?;

        Ok(FittedLinearDrift {
            name: self.name.clone(),
            growth_factor: self.growth_factor,
            drift,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedLinearDrift {
    /// Mean change per period before scaling
    pub fn average_change(&self) -> f64 {
        self.drift.average_change()
    }
}

impl FittedProjection for FittedLinearDrift {
    // Deterministic; the jitter source is left untouched
    fn forecast(&self, horizon: usize, _jitter: &mut dyn JitterSource) -> Result<ForecastResult> {
        let mut values = Vec::with_capacity(horizon);
        for step in 1..=horizon {
            let value = self.drift.value_at(step, self.growth_factor);
            if !value.is_finite() {
                return Err(MathError::CalculationError(format!(
                    "Drift overflowed at step {}",
                    step
                ))
                .into());
            }
            values.push(floor_at_zero(value));
        }

        ForecastResult::new(values, horizon)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::FixedJitter;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_step() {
        let model = LinearDriftModel::new(1.0).unwrap();
        let fitted = model.fit(&[100.0, 110.0, 120.0]).unwrap();

        let forecast = fitted.forecast(2, &mut FixedJitter::zero()).unwrap();
        assert_eq!(forecast.values(), &[130.0, 140.0]);
        assert_relative_eq!(fitted.average_change(), 10.0);
    }

    #[test]
    fn test_growth_factor_scales_change() {
        let fitted = LinearDriftModel::new(1.2)
            .unwrap()
            .fit(&[10.0, 20.0])
            .unwrap();

        let forecast = fitted.forecast(3, &mut FixedJitter::zero()).unwrap();
        assert_relative_eq!(forecast.values()[0], 32.0);
        assert_relative_eq!(forecast.values()[2], 56.0);
    }

    #[test]
    fn test_clamps_at_zero() {
        let fitted = LinearDriftModel::new(1.0)
            .unwrap()
            .fit(&[30.0, 20.0, 10.0])
            .unwrap();

        let forecast = fitted.forecast(3, &mut FixedJitter::zero()).unwrap();
        assert_eq!(forecast.values(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_needs_two_observations() {
        let model = LinearDriftModel::new(1.0).unwrap();
        assert!(matches!(
            model.fit(&[5.0]),
            Err(ProjectionError::MathError(_))
        ));
    }

    #[test]
    fn test_overflowing_drift_is_math_error() {
        let fitted = LinearDriftModel::new(1.0)
            .unwrap()
            .fit(&[f64::MAX / 2.0, f64::MAX])
            .unwrap();

        assert!(matches!(
            fitted.forecast(2, &mut FixedJitter::zero()),
            Err(ProjectionError::MathError(MathError::CalculationError(_)))
        ));
    }

    #[test]
    fn test_rejects_non_finite_growth() {
        assert!(LinearDriftModel::new(f64::INFINITY).is_err());
    }
}
