//! Forward projection of monthly metrics
//!
//! The projector turns an ordered history into `horizon` synthetic months
//! following the last observed one. Each requested metric with at least
//! [`MIN_OBSERVATIONS`] valid values gets a value in every predicted month;
//! any other metric is left out of the output entirely.
//!
//! Projections are naive extrapolations meant for dashboard overlays. They
//! are not forecasts in any statistical sense.

use crate::config::{ProjectionConfig, ProjectionStrategy};
use crate::data::{HistoricalRecord, MetricSeries, PredictedRecord};
use crate::error::{ProjectionError, Result};
use crate::jitter::{JitterSource, UniformJitter};
use crate::models::{FittedProjection, LinearDriftModel, PatternRepeatModel, ProjectionModel};
use crate::period::Period;
use log::{debug, info};
use std::collections::BTreeSet;

/// Valid observations a metric needs before it is projected
pub const MIN_OBSERVATIONS: usize = 2;

/// Projects histories according to a validated configuration
#[derive(Debug, Clone)]
pub struct Projector {
    config: ProjectionConfig,
}

impl Projector {
    /// Create a projector, rejecting invalid configurations
    pub fn new(config: ProjectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project with a uniform jitter generator, seeded from the
    /// configuration when a seed is set
    pub fn project<S: AsRef<str>>(
        &self,
        history: &[HistoricalRecord],
        metrics: &[S],
    ) -> Result<Vec<PredictedRecord>> {
        let mut jitter = match self.config.seed {
            Some(seed) => UniformJitter::seeded(seed),
            None => UniformJitter::from_entropy(),
        };
        self.project_with_jitter(history, metrics, &mut jitter)
    }

    /// Project with an injected jitter source.
    ///
    /// Metrics are processed in sorted name order and jitter is drawn per
    /// step within each metric, so a deterministic source gives a
    /// deterministic result.
    pub fn project_with_jitter<S: AsRef<str>>(
        &self,
        history: &[HistoricalRecord],
        metrics: &[S],
        jitter: &mut dyn JitterSource,
    ) -> Result<Vec<PredictedRecord>> {
        let last_period = validate_history(history)?;

        let steps = self.config.steps();
        if steps == 0 {
            debug!("Horizon {} yields no projection", self.config.horizon);
            return Ok(Vec::new());
        }

        let mut records: Vec<PredictedRecord> = last_period
            .following(steps)
            .into_iter()
            .map(PredictedRecord::new)
            .collect();

        let names: BTreeSet<&str> = metrics.iter().map(|m| m.as_ref()).collect();
        let mut projected = 0;

        for metric in &names {
            let series = MetricSeries::from_history(history, metric);
            if series.len() < MIN_OBSERVATIONS {
                debug!(
                    "Skipping {}: {} valid observation(s)",
                    metric,
                    series.len()
                );
                continue;
            }

            let values = match self.project_series(metric, &series.values(), steps, jitter) {
                Ok(values) => values,
                Err(ProjectionError::MathError(e)) => {
                    debug!("Skipping {}: {}", metric, e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            for (record, value) in records.iter_mut().zip(values) {
                record.insert(metric, value);
            }
            projected += 1;
        }

        info!(
            "Projected {} of {} metrics for {} months after {} ({:?})",
            projected,
            names.len(),
            steps,
            last_period,
            self.config.strategy
        );

        Ok(records)
    }

    fn project_series(
        &self,
        metric: &str,
        observations: &[f64],
        steps: usize,
        jitter: &mut dyn JitterSource,
    ) -> Result<Vec<f64>> {
        let forecast = match self.config.strategy {
            ProjectionStrategy::LinearDrift => {
                let model = LinearDriftModel::new(self.config.growth_factor(metric))?;
                model.fit(observations)?.forecast(steps, jitter)?
            }
            ProjectionStrategy::PatternRepeat => {
                let model = PatternRepeatModel::new(
                    self.config.pattern_length,
                    self.config.jitter_amplitude,
                )?;
                model.fit(observations)?.forecast(steps, jitter)?
            }
        };

        Ok(forecast.into_values())
    }
}

/// Project `history` with `config`.
///
/// Shorthand for [`Projector::new`] followed by [`Projector::project`].
pub fn project<S: AsRef<str>>(
    history: &[HistoricalRecord],
    metrics: &[S],
    config: &ProjectionConfig,
) -> Result<Vec<PredictedRecord>> {
    Projector::new(config.clone())?.project(history, metrics)
}

/// Check the history is non-empty and chronological; returns its last period
fn validate_history(history: &[HistoricalRecord]) -> Result<Period> {
    let last = history
        .last()
        .ok_or_else(|| ProjectionError::InvalidInput("History is empty".to_string()))?;

    if let Some(pair) = history
        .windows(2)
        .find(|pair| pair[1].period() < pair[0].period())
    {
        return Err(ProjectionError::InvalidInput(format!(
            "History is not chronological: {} follows {}",
            pair[1].period(),
            pair[0].period()
        )));
    }

    Ok(last.period())
}
