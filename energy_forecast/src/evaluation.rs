//! Accuracy of projections against held-out history

use crate::config::ProjectionConfig;
use crate::data::HistoricalRecord;
use crate::error::{ProjectionError, Result};
use crate::jitter::JitterSource;
use crate::projector::Projector;
use statrs::statistics::Statistics;
use std::fmt;

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error; `None` when every actual value is zero
    pub mape: Option<f64>,
    /// Number of compared pairs
    pub samples: usize,
}

/// Compare forecast values with the actual values at the same positions
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ProjectionError::ValidationError(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual.iter())
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).mean();
    let rmse = errors.iter().map(|e| e.powi(2)).mean().sqrt();

    let percentage_errors: Vec<f64> = actual
        .iter()
        .zip(errors.iter())
        .filter(|(&a, _)| a != 0.0)
        .map(|(&a, &e)| (e.abs() / a.abs()) * 100.0)
        .collect();
    let mape = if percentage_errors.is_empty() {
        None
    } else {
        Some(percentage_errors.mean())
    };

    Ok(ForecastAccuracy {
        mae,
        rmse,
        mape,
        samples: errors.len(),
    })
}

/// Project one metric from all but the last `holdout` records and score the
/// projection against the held-out observations
pub fn backtest_metric(
    history: &[HistoricalRecord],
    metric: &str,
    holdout: usize,
    config: &ProjectionConfig,
    jitter: &mut dyn JitterSource,
) -> Result<ForecastAccuracy> {
    if holdout == 0 || holdout >= history.len() {
        return Err(ProjectionError::ValidationError(format!(
            "Holdout must be between 1 and {}, got {}",
            history.len().saturating_sub(1),
            holdout
        )));
    }

    let (train, test) = history.split_at(history.len() - holdout);
    let last_test = test[test.len() - 1].period();
    // Cover every held-out month even if the history has gaps
    let horizon = last_test.months_since(&train[train.len() - 1].period());

    let projector = Projector::new(config.clone().with_horizon(horizon))?;
    let predicted = projector.project_with_jitter(train, &[metric], jitter)?;

    let (forecast, actual): (Vec<f64>, Vec<f64>) = test
        .iter()
        .filter_map(|record| {
            let actual = record.value(metric)?;
            let forecast = predicted
                .iter()
                .find(|p| p.period() == record.period())?
                .value(metric)?;
            Some((forecast, actual))
        })
        .unzip();

    if forecast.is_empty() {
        return Err(ProjectionError::ValidationError(format!(
            "No held-out observations of {} to compare",
            metric
        )));
    }

    forecast_accuracy(&forecast, &actual)
}

impl fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Projection Accuracy ({} samples):", self.samples)?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        match self.mape {
            Some(mape) => writeln!(f, "  MAPE:  {:.4}%", mape)?,
            None => writeln!(f, "  MAPE:  n/a")?,
        }
        Ok(())
    }
}
