//! Pattern-repeat projection
//!
//! The trailing `min(n, pattern_length)` observations are replayed in order,
//! each multiplied by `1 + jitter` and floored at zero.

use crate::error::{ProjectionError, Result};
use crate::jitter::JitterSource;
use crate::models::{floor_at_zero, FittedProjection, ForecastResult, ProjectionModel};
use trend_math::RepeatingPattern;

/// Pattern-repeat model
#[derive(Debug, Clone)]
pub struct PatternRepeatModel {
    name: String,
    pattern_length: usize,
    jitter_amplitude: f64,
}

/// Pattern fitted to one metric
#[derive(Debug, Clone)]
pub struct FittedPatternRepeat {
    name: String,
    pattern: RepeatingPattern,
    jitter_amplitude: f64,
}

impl PatternRepeatModel {
    /// Create a new pattern-repeat model
    pub fn new(pattern_length: usize, jitter_amplitude: f64) -> Result<Self> {
        if pattern_length == 0 {
            return Err(ProjectionError::InvalidParameter(
                "Pattern length must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&jitter_amplitude) {
            return Err(ProjectionError::InvalidParameter(
                "Jitter amplitude must be in [0, 1)".to_string(),
            ));
        }

        Ok(Self {
            name: format!(
                "Pattern Repeat (length={}, jitter={})",
                pattern_length, jitter_amplitude
            ),
            pattern_length,
            jitter_amplitude,
        })
    }
}

impl ProjectionModel for PatternRepeatModel {
    type Fitted = FittedPatternRepeat;

    fn fit(&self, observations: &[f64]) -> Result<Self::Fitted> {
        let pattern = RepeatingPattern::fit(observations, self.pattern_length)?;

        Ok(FittedPatternRepeat {
            name: self.name.clone(),
            pattern,
            jitter_amplitude: self.jitter_amplitude,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedPatternRepeat {
    /// The replayed window
    pub fn pattern(&self) -> &[f64] {
        self.pattern.values()
    }
}

impl FittedProjection for FittedPatternRepeat {
    fn forecast(&self, horizon: usize, jitter: &mut dyn JitterSource) -> Result<ForecastResult> {
        let mut values = Vec::with_capacity(horizon);
        for step in 1..=horizon {
            let base = self.pattern.value_at(step)?;
            let factor = 1.0 + jitter.next_jitter(self.jitter_amplitude);
            values.push(floor_at_zero(base * factor));
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
    use crate::jitter::{FixedJitter, UniformJitter};

    #[test]
    fn test_zero_jitter_replays_pattern() {
        let fitted = PatternRepeatModel::new(12, 0.01)
            .unwrap()
            .fit(&[3.0, 1.0, 2.0])
            .unwrap();

        let forecast = fitted.forecast(7, &mut FixedJitter::zero()).unwrap();
        assert_eq!(forecast.values(), &[3.0, 1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_pattern_truncated_to_length() {
        let observations: Vec<f64> = (1..=20).map(|v| v as f64).collect();
        let fitted = PatternRepeatModel::new(12, 0.0)
            .unwrap()
            .fit(&observations)
            .unwrap();

        assert_eq!(fitted.pattern().len(), 12);
        let forecast = fitted.forecast(13, &mut FixedJitter::zero()).unwrap();
        assert_eq!(forecast.values()[0], 9.0);
        assert_eq!(forecast.values()[11], 20.0);
        assert_eq!(forecast.values()[12], 9.0);
    }

    #[test]
    fn test_fixed_jitter_scales_values() {
        let fitted = PatternRepeatModel::new(12, 0.01)
            .unwrap()
            .fit(&[100.0, 200.0])
            .unwrap();

        let forecast = fitted.forecast(2, &mut FixedJitter(0.01)).unwrap();
        approx::assert_relative_eq!(forecast.values()[0], 101.0);
        approx::assert_relative_eq!(forecast.values()[1], 202.0);
    }

    #[test]
    fn test_random_jitter_within_one_percent() {
        let fitted = PatternRepeatModel::new(12, 0.01)
            .unwrap()
            .fit(&[100.0, 50.0, 0.0])
            .unwrap();

        let forecast = fitted.forecast(30, &mut UniformJitter::seeded(9)).unwrap();
        for (value, base) in forecast.values().iter().zip([100.0, 50.0, 0.0].iter().cycle()) {
            assert!(*value >= 0.0);
            assert!((value - base).abs() <= base * 0.01 + 1e-9);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(PatternRepeatModel::new(0, 0.01).is_err());
        assert!(PatternRepeatModel::new(12, -0.1).is_err());
        assert!(PatternRepeatModel::new(12, 1.0).is_err());
    }
}
