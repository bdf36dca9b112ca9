//! Chart series assembly for the dashboard
//!
//! A single table of [`ChartDescriptor`]s drives every chart. The display
//! layer receives ready-made [`ChartSeries`]: the observed points of the
//! selected year followed, when enabled, by the projected points.

use crate::config::ProjectionConfig;
use crate::data::{HistoricalRecord, PredictedRecord};
use crate::error::{ProjectionError, Result};
use crate::jitter::JitterSource;
use crate::metric;
use crate::period::Period;
use crate::projector::Projector;
use crate::sheet::filter_year;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Area,
}

/// One chart: which metric, drawn how, under which title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub metric: String,
    pub kind: ChartKind,
    pub title: String,
}

/// Ordered list of charts on a dashboard page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    charts: Vec<ChartDescriptor>,
}

/// Builder for [`ViewConfig`]
#[derive(Debug, Default)]
pub struct ViewConfigBuilder {
    charts: Vec<ChartDescriptor>,
}

impl ViewConfigBuilder {
    pub fn chart(mut self, metric: &str, kind: ChartKind, title: &str) -> Self {
        self.charts.push(ChartDescriptor {
            metric: metric.to_string(),
            kind,
            title: title.to_string(),
        });
        self
    }

    pub fn line(self, metric: &str, title: &str) -> Self {
        self.chart(metric, ChartKind::Line, title)
    }

    pub fn bar(self, metric: &str, title: &str) -> Self {
        self.chart(metric, ChartKind::Bar, title)
    }

    pub fn area(self, metric: &str, title: &str) -> Self {
        self.chart(metric, ChartKind::Area, title)
    }

    pub fn build(self) -> ViewConfig {
        ViewConfig {
            charts: self.charts,
        }
    }
}

impl ViewConfig {
    pub fn builder() -> ViewConfigBuilder {
        ViewConfigBuilder::default()
    }

    /// The campus energy overview page
    pub fn energy_overview() -> Self {
        ViewConfig::builder()
            .line(metric::CONSUMPTION, "Total Consumption")
            .line(metric::SOLAR, "Total Solar")
            .line(metric::OTHER_SOURCES, "Other Sources")
            .line(metric::SAVINGS, "Total Savings")
            .area(metric::SOLAR_PERCENTAGE, "Solar Percentage")
            .line(metric::TOTAL_SAVINGS, "Total Savings from Solar")
            .bar("htc179", "HTC 179")
            .bar("htc232", "HTC 232")
            .line("totalGED", "Total GED")
            .bar("solarCapex", "Solar Capex")
            .bar("solarOpex", "Solar Opex")
            .line("c2kWh", "C2 kWh")
            .line("c2SolarPercentage", "Solar Percentage of C2")
            .line("rsPerKWh", "Rs/kWh")
            .bar("savingsFrom1MWpSolar", "Savings from 1 MWp Solar")
            .bar("savingsFromCapex", "Savings from Capex")
            .bar("htc179Amount", "HTC 179 Amount")
            .bar("htc232Amount", "HTC 232 Amount")
            .line("totalAmount", "Total Amount")
            .build()
    }

    pub fn charts(&self) -> &[ChartDescriptor] {
        &self.charts
    }

    /// Distinct metrics shown, in first-appearance order
    pub fn metrics(&self) -> Vec<&str> {
        let mut metrics: Vec<&str> = Vec::new();
        for chart in &self.charts {
            if !metrics.contains(&chart.metric.as_str()) {
                metrics.push(&chart.metric);
            }
        }
        metrics
    }
}

/// Render-time selections made by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardState {
    /// Show only this calendar year of history; `None` shows everything
    pub year: Option<i32>,
    /// Append projected points to every chart
    pub show_predictions: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    #[serde(rename = "date")]
    pub period: Period,
    pub value: f64,
    pub projected: bool,
}

/// Points of one chart, observed first and projected after
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub descriptor: ChartDescriptor,
    pub points: Vec<SeriesPoint>,
}

impl ChartSeries {
    pub fn observed(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter().filter(|p| !p.projected)
    }

    pub fn projected(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter().filter(|p| p.projected)
    }
}

/// Build the series of every chart in `view`.
///
/// Projection always runs on the full history; the year selection only
/// narrows the observed points. An unusable history drops the projected
/// points instead of failing the page.
pub fn build_view(
    history: &[HistoricalRecord],
    view: &ViewConfig,
    state: &DashboardState,
    config: &ProjectionConfig,
    jitter: &mut dyn JitterSource,
) -> Result<Vec<ChartSeries>> {
    let shown = match state.year {
        Some(year) => filter_year(history, year),
        None => history.to_vec(),
    };

    let predictions = if state.show_predictions {
        projected_overlay(history, view, config, jitter)?
    } else {
        Vec::new()
    };

    let series = view
        .charts()
        .iter()
        .map(|descriptor| {
            let observed = shown.iter().filter_map(|record| {
                record.value(&descriptor.metric).map(|value| SeriesPoint {
                    period: record.period(),
                    value,
                    projected: false,
                })
            });
            let projected = predictions.iter().filter_map(|record| {
                record.value(&descriptor.metric).map(|value| SeriesPoint {
                    period: record.period(),
                    value,
                    projected: true,
                })
            });

            ChartSeries {
                descriptor: descriptor.clone(),
                points: observed.chain(projected).collect(),
            }
        })
        .collect();

    Ok(series)
}

fn projected_overlay(
    history: &[HistoricalRecord],
    view: &ViewConfig,
    config: &ProjectionConfig,
    jitter: &mut dyn JitterSource,
) -> Result<Vec<PredictedRecord>> {
    let projector = Projector::new(config.clone())?;
    match projector.project_with_jitter(history, &view.metrics(), jitter) {
        Ok(predictions) => Ok(predictions),
        Err(ProjectionError::InvalidInput(reason)) => {
            warn!("Dropping projection overlay: {}", reason);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}
