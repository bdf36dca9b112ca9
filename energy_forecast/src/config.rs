//! Projection configuration

use crate::error::{ProjectionError, Result};
use crate::metric::MetricKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use trend_math::MAX_PATTERN_LENGTH;

/// Default number of months to project
pub const DEFAULT_HORIZON: i64 = 6;

/// Longest horizon accepted, in months
pub const MAX_HORIZON: i64 = 1200;

/// Default half-width of the pattern-repeat jitter band
pub const DEFAULT_JITTER_AMPLITUDE: f64 = 0.01;

/// Extrapolation rule applied to every metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionStrategy {
    /// Last value plus the scaled mean change per month
    #[default]
    LinearDrift,
    /// Replay of the trailing months with a small random perturbation
    PatternRepeat,
}

impl std::str::FromStr for ProjectionStrategy {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "linear_drift" | "linear" | "drift" => Ok(ProjectionStrategy::LinearDrift),
            "pattern_repeat" | "pattern" | "repeat" => Ok(ProjectionStrategy::PatternRepeat),
            other => Err(ProjectionError::ParseError(format!(
                "Unknown projection strategy: {}",
                other
            ))),
        }
    }
}

/// Settings for a projection run.
///
/// Every field is optional when deserializing; missing fields take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Months to project; zero or negative produces no records
    pub horizon: i64,
    pub strategy: ProjectionStrategy,
    /// Per-metric overrides of the linear drift multiplier
    pub growth_factors: BTreeMap<String, f64>,
    /// Longest trailing window replayed by the pattern-repeat strategy
    pub pattern_length: usize,
    /// Jitter is drawn from `[-jitter_amplitude, jitter_amplitude]`
    pub jitter_amplitude: f64,
    /// Seed for the jitter generator; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            strategy: ProjectionStrategy::default(),
            growth_factors: BTreeMap::new(),
            pattern_length: MAX_PATTERN_LENGTH,
            jitter_amplitude: DEFAULT_JITTER_AMPLITUDE,
            seed: None,
        }
    }
}

impl ProjectionConfig {
    pub fn with_horizon(mut self, horizon: i64) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_strategy(mut self, strategy: ProjectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Override the growth factor of one metric
    pub fn with_growth_factor(mut self, metric: &str, factor: f64) -> Self {
        self.growth_factors.insert(metric.to_string(), factor);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of months to generate, treating non-positive horizons as zero
    pub fn steps(&self) -> usize {
        usize::try_from(self.horizon).unwrap_or(0)
    }

    /// Growth factor for a metric: the override if any, else the default for
    /// its kind
    pub fn growth_factor(&self, metric: &str) -> f64 {
        self.growth_factors
            .get(metric)
            .copied()
            .unwrap_or_else(|| MetricKind::classify(metric).default_growth_factor())
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.horizon > MAX_HORIZON {
            return Err(ProjectionError::InvalidParameter(format!(
                "Horizon must be at most {} months, got {}",
                MAX_HORIZON, self.horizon
            )));
        }

        if let Some((metric, factor)) = self.growth_factors.iter().find(|(_, f)| !f.is_finite()) {
            return Err(ProjectionError::InvalidParameter(format!(
                "Growth factor for {} must be finite, got {}",
                metric, factor
            )));
        }

        if self.pattern_length == 0 {
            return Err(ProjectionError::InvalidParameter(
                "Pattern length must be positive".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.jitter_amplitude) {
            return Err(ProjectionError::InvalidParameter(format!(
                "Jitter amplitude must be in [0, 1), got {}",
                self.jitter_amplitude
            )));
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
