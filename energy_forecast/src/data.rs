//! Historical and predicted monthly records

use crate::error::{ProjectionError, Result};
use crate::period::Period;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One observed month: a value per metric name.
///
/// A metric whose value is missing, NaN or infinite does not count as an
/// observation for that month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawHistoricalRecord")]
pub struct HistoricalRecord {
    #[serde(rename = "date")]
    period: Period,
    #[serde(flatten)]
    values: BTreeMap<String, f64>,
}

/// Wire form of a record; non-finite values serialize as `null`
#[derive(Deserialize)]
struct RawHistoricalRecord {
    #[serde(rename = "date")]
    period: Period,
    #[serde(flatten)]
    values: BTreeMap<String, Option<f64>>,
}

impl From<RawHistoricalRecord> for HistoricalRecord {
    fn from(raw: RawHistoricalRecord) -> Self {
        Self {
            period: raw.period,
            values: raw
                .values
                .into_iter()
                .filter_map(|(metric, value)| value.map(|v| (metric, v)))
                .collect(),
        }
    }
}

impl HistoricalRecord {
    /// Create a record with no values
    pub fn new(period: Period) -> Self {
        Self {
            period,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style variant of [`HistoricalRecord::set_value`]
    pub fn with_value(mut self, metric: &str, value: f64) -> Self {
        self.set_value(metric, value);
        self
    }

    /// Set or replace the raw value of a metric
    pub fn set_value(&mut self, metric: &str, value: f64) {
        self.values.insert(metric.to_string(), value);
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// The value of a metric, if present and finite
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.values.get(metric).copied().filter(|v| v.is_finite())
    }

    /// All stored values, including non-finite ones
    pub fn raw_values(&self) -> &BTreeMap<String, f64> {
        &self.values
    }

    /// Names of the metrics with a stored value
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }
}

/// A synthetic future month produced by the projector.
///
/// Only metrics that could be projected carry a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedRecord {
    #[serde(rename = "date")]
    period: Period,
    #[serde(flatten)]
    values: BTreeMap<String, f64>,
}

impl PredictedRecord {
    pub(crate) fn new(period: Period) -> Self {
        Self {
            period,
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, metric: &str, value: f64) {
        self.values.insert(metric.to_string(), value);
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Projected value of a metric; `None` when the metric was not projected
    pub fn value(&self, metric: &str) -> Option<f64> {
        self.values.get(metric).copied()
    }

    pub fn values(&self) -> &BTreeMap<String, f64> {
        &self.values
    }

    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The valid observations of one metric, in history order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    name: String,
    observations: Vec<(Period, f64)>,
}

impl MetricSeries {
    /// Collect a metric's finite values from the history, skipping gaps
    pub fn from_history(history: &[HistoricalRecord], metric: &str) -> Self {
        let observations = history
            .iter()
            .filter_map(|record| record.value(metric).map(|v| (record.period(), v)))
            .collect();

        Self {
            name: metric.to_string(),
            observations,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn observations(&self) -> &[(Period, f64)] {
        &self.observations
    }

    /// Observed values without their periods
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|(_, v)| *v).collect()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn last_period(&self) -> Option<Period> {
        self.observations.last().map(|(p, _)| *p)
    }
}

/// Parse a spreadsheet cell as a number.
///
/// Whitespace, thousands separators and percent signs are ignored. Blank,
/// non-numeric and non-finite cells yield `None`.
pub fn parse_number(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '%')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Loader for monthly history stored as CSV
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load history from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<HistoricalRecord>> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load history from any CSV source with a header row.
    ///
    /// One column holds the month, every other column is a metric. Rows with
    /// a blank date are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<HistoricalRecord>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.len() < 2 {
            return Err(ProjectionError::DataError(
                "Expected a date column and at least one metric column".to_string(),
            ));
        }
        let date_index = Self::detect_date_column(&headers);

        let mut records = Vec::new();
        for (row_index, row) in rdr.records().enumerate() {
            let row = row?;
            // Header is line 1
            let line = row_index + 2;

            let raw_date = row.get(date_index).unwrap_or("");
            if raw_date.is_empty() {
                debug!("Skipping line {} with a blank date", line);
                continue;
            }
            let period = raw_date.parse::<Period>().map_err(|e| {
                ProjectionError::DataError(format!("Line {}: {}", line, e))
            })?;

            let mut record = HistoricalRecord::new(period);
            for (column, metric) in headers.iter().enumerate() {
                if column == date_index || metric.is_empty() {
                    continue;
                }
                match row.get(column).and_then(parse_number) {
                    Some(value) => record.set_value(metric, value),
                    None => debug!("Line {}: no numeric value for {}", line, metric),
                }
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(ProjectionError::DataError(
                "No data rows found".to_string(),
            ));
        }

        Ok(records)
    }

    /// Find the date column by name, falling back to the first column
    fn detect_date_column(headers: &csv::StringRecord) -> usize {
        headers
            .iter()
            .position(|name| {
                let lower = name.to_lowercase();
                lower.contains("date") || lower.contains("period") || lower.contains("month")
            })
            .unwrap_or(0)
    }
}
