//! # WattWise
//!
//! Facade over the WattWise crates: `trend_math` for the numeric
//! primitives and `energy_forecast` for periods, records and the projector.
//!
//! ## Example
//!
//! ```
//! use wattwise_workspace::prelude::*;
//!
//! let start: Period = "2023-11".parse().unwrap();
//! let history = vec![
//!     HistoricalRecord::new(start).with_value("solar", 40.0),
//!     HistoricalRecord::new(start.next()).with_value("solar", 44.0),
//! ];
//!
//! let config = ProjectionConfig::default().with_horizon(1);
//! let predicted = project(&history, &["solar"], &config).unwrap();
//! assert_eq!(predicted[0].value("solar"), Some(48.0));
//! ```

pub use energy_forecast;
pub use trend_math;

/// The types most dashboards need
pub mod prelude {
    pub use energy_forecast::dashboard::{build_view, DashboardState, ViewConfig};
    pub use energy_forecast::{
        project, DataLoader, FixedJitter, HistoricalRecord, JitterSource, Period,
        PredictedRecord, ProjectionConfig, ProjectionError, ProjectionStrategy, Projector,
        UniformJitter,
    };
}
