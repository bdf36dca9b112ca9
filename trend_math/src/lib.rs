//! # Trend Math
//!
//! Numeric primitives for extrapolating short metric series.
//! This crate knows nothing about calendars or metric names; it works on
//! plain ordered `f64` observations and leaves clamping and scheduling to
//! its callers.

use thiserror::Error;

pub mod drift;
pub mod pattern;

pub use drift::{average_change, differences, LinearDrift};
pub use pattern::{RepeatingPattern, MAX_PATTERN_LENGTH};

/// Errors that can occur in trend calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for trend math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Reject any NaN or infinite observation.
pub(crate) fn ensure_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(MathError::InvalidInput(format!(
            "Observation at index {} is not a finite number",
            index
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite(&[1.0, 2.0, 3.0]).is_ok());
        assert!(ensure_finite(&[]).is_ok());

        let err = ensure_finite(&[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, MathError::InvalidInput(_)));
        assert!(err.to_string().contains("index 1"));
    }
}
