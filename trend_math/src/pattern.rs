//! Repeating pattern extrapolation

use crate::{ensure_finite, MathError, Result};
use serde::{Deserialize, Serialize};

/// Longest pattern kept by default: one year of monthly observations.
pub const MAX_PATTERN_LENGTH: usize = 12;

/// The trailing window of a series, replayed cyclically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatingPattern {
    values: Vec<f64>,
}

impl RepeatingPattern {
    /// Keep the last `min(values.len(), max_length)` observations
    pub fn fit(values: &[f64], max_length: usize) -> Result<Self> {
        if max_length == 0 {
            return Err(MathError::InvalidInput(
                "Pattern length must be positive".to_string(),
            ));
        }
        if values.is_empty() {
            return Err(MathError::InsufficientData(
                "Pattern needs at least 1 observation".to_string(),
            ));
        }
        ensure_finite(values)?;

        let start = values.len().saturating_sub(max_length);

        Ok(Self {
            values: values[start..].to_vec(),
        })
    }

    /// Pattern value for a 1-indexed step after the last observation
    pub fn value_at(&self, step: usize) -> Result<f64> {
        if step == 0 {
            return Err(MathError::InvalidInput(
                "Steps are 1-indexed".to_string(),
            ));
        }
        Ok(self.values[(step - 1) % self.values.len()])
    }

    /// Number of values in one cycle
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_series_keeps_everything() {
        let pattern = RepeatingPattern::fit(&[1.0, 2.0, 3.0], MAX_PATTERN_LENGTH).unwrap();
        assert_eq!(pattern.len(), 3);
        assert_eq!(pattern.values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_long_series_keeps_tail() {
        let values: Vec<f64> = (1..=15).map(|v| v as f64).collect();
        let pattern = RepeatingPattern::fit(&values, MAX_PATTERN_LENGTH).unwrap();

        assert_eq!(pattern.len(), 12);
        assert_eq!(pattern.values()[0], 4.0);
        assert_eq!(pattern.values()[11], 15.0);
    }

    #[test]
    fn test_value_at_cycles() {
        let pattern = RepeatingPattern::fit(&[5.0, 6.0, 7.0], 12).unwrap();

        let cycled: Vec<f64> = (1..=7).map(|k| pattern.value_at(k).unwrap()).collect();
        assert_eq!(cycled, vec![5.0, 6.0, 7.0, 5.0, 6.0, 7.0, 5.0]);
        assert!(pattern.value_at(0).is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            RepeatingPattern::fit(&[], 12),
            Err(MathError::InsufficientData(_))
        ));
        assert!(matches!(
            RepeatingPattern::fit(&[1.0], 0),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(
            RepeatingPattern::fit(&[1.0, f64::NAN], 12),
            Err(MathError::InvalidInput(_))
        ));
    }
}
