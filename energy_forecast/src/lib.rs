//! # Energy Forecast
//!
//! Naive forward projection of monthly energy metrics, for overlaying on
//! consumption dashboards.
//!
//! ## Features
//!
//! - Calendar-month periods and per-metric historical records
//! - Two projection strategies: linear drift and pattern repeat with jitter
//! - Per-metric growth factors with kind-based defaults
//! - CSV and spreadsheet-row loading
//! - Dashboard chart series with optional projected overlay
//! - Holdout backtesting of a projection
//!
//! Projections are extrapolation heuristics for display. They make no claim
//! to forecast accuracy.
//!
//! ## Quick Start
//!
//! ```rust
//! use energy_forecast::{project, HistoricalRecord, ProjectionConfig};
//!
//! let history: Vec<HistoricalRecord> = [("2023-10", 100.0), ("2023-11", 110.0), ("2023-12", 120.0)]
//!     .iter()
//!     .map(|(date, value)| {
//!         HistoricalRecord::new(date.parse().unwrap()).with_value("consumption", *value)
//!     })
//!     .collect();
//!
//! let config = ProjectionConfig::default().with_horizon(2);
//! let predicted = project(&history, &["consumption"], &config)?;
//!
//! assert_eq!(predicted[0].period().to_string(), "2024-01");
//! assert_eq!(predicted[1].value("consumption"), Some(140.0));
//! # Ok::<(), energy_forecast::ProjectionError>(())
//! ```

pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod jitter;
pub mod logger;
pub mod metric;
pub mod models;
pub mod period;
pub mod projector;
pub mod sheet;

// Re-export commonly used types
pub use crate::config::{ProjectionConfig, ProjectionStrategy};
pub use crate::data::{DataLoader, HistoricalRecord, MetricSeries, PredictedRecord};
pub use crate::error::{ProjectionError, Result};
pub use crate::jitter::{FixedJitter, JitterSource, UniformJitter};
pub use crate::metric::MetricKind;
pub use crate::period::Period;
pub use crate::projector::{project, Projector};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
