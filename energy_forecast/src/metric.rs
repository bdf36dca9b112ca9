//! Metric names and kinds
//!
//! Metrics form an open set keyed by name. The constants below are the names
//! the energy sheet produces; any other name is accepted everywhere.

use serde::{Deserialize, Serialize};

pub const CONSUMPTION: &str = "consumption";
pub const SOLAR: &str = "solar";
pub const OTHER_SOURCES: &str = "otherSources";
pub const SAVINGS: &str = "savings";
pub const PRICE: &str = "price";
pub const SOLAR_PERCENTAGE: &str = "solarPercentage";
pub const TOTAL_SAVINGS: &str = "totalSavings";

/// Broad category of a metric, used only to pick a default growth factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Shares such as the solar fraction of consumption
    Percentage,
    /// Monetary savings
    Savings,
    /// Unit prices
    Price,
    /// Everything else
    Other,
}

impl MetricKind {
    /// Classify a metric by its name (case-insensitive substring match)
    pub fn classify(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("percent") || lower.contains("fraction") {
            MetricKind::Percentage
        } else if lower.contains("saving") {
            MetricKind::Savings
        } else if lower.contains("price") {
            MetricKind::Price
        } else {
            MetricKind::Other
        }
    }

    /// Default multiplier on the linear drift of this kind of metric.
    ///
    /// Percentages are damped and savings amplified. This is a presentation
    /// heuristic and carries no statistical meaning.
    pub fn default_growth_factor(&self) -> f64 {
        match self {
            MetricKind::Percentage => 0.5,
            MetricKind::Savings => 1.2,
            MetricKind::Price => 1.1,
            MetricKind::Other => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sheet_metrics() {
        assert_eq!(MetricKind::classify(SOLAR_PERCENTAGE), MetricKind::Percentage);
        assert_eq!(MetricKind::classify("c2SolarPercentage"), MetricKind::Percentage);
        assert_eq!(MetricKind::classify("solar_fraction"), MetricKind::Percentage);
        assert_eq!(MetricKind::classify(SAVINGS), MetricKind::Savings);
        assert_eq!(MetricKind::classify(TOTAL_SAVINGS), MetricKind::Savings);
        assert_eq!(MetricKind::classify("savingsFromCapex"), MetricKind::Savings);
        assert_eq!(MetricKind::classify(PRICE), MetricKind::Price);
        assert_eq!(MetricKind::classify(CONSUMPTION), MetricKind::Other);
        assert_eq!(MetricKind::classify(OTHER_SOURCES), MetricKind::Other);
    }

    #[test]
    fn test_default_growth_factors() {
        assert_eq!(MetricKind::Percentage.default_growth_factor(), 0.5);
        assert_eq!(MetricKind::Savings.default_growth_factor(), 1.2);
        assert_eq!(MetricKind::Price.default_growth_factor(), 1.1);
        assert_eq!(MetricKind::Other.default_growth_factor(), 1.0);
    }
}
