//! Mapping raw spreadsheet rows to historical records
//!
//! The energy sheet is fetched as an array of string rows. A [`SheetLayout`]
//! says which rows to skip, where the month lives and which column holds
//! each metric.

use crate::data::{parse_number, HistoricalRecord};
use crate::error::Result;
use crate::metric;
use crate::period::Period;
use log::debug;
use serde::{Deserialize, Serialize};

/// A metric read straight from a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub metric: String,
    pub column: usize,
}

/// A metric computed as the difference of two mapped metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetric {
    pub metric: String,
    pub minuend: String,
    pub subtrahend: String,
}

/// Column layout of a sheet export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// Leading rows (titles, headers, spacers) to ignore
    pub header_rows: usize,
    pub date_column: usize,
    pub columns: Vec<ColumnMapping>,
    #[serde(default)]
    pub derived: Vec<DerivedMetric>,
}

impl SheetLayout {
    /// Start a layout with no metric columns
    pub fn new(header_rows: usize, date_column: usize) -> Self {
        Self {
            header_rows,
            date_column,
            columns: Vec::new(),
            derived: Vec::new(),
        }
    }

    /// Map `metric` to a column
    pub fn column(mut self, metric: &str, column: usize) -> Self {
        self.columns.push(ColumnMapping {
            metric: metric.to_string(),
            column,
        });
        self
    }

    /// Define `metric = minuend - subtrahend`
    pub fn difference(mut self, metric: &str, minuend: &str, subtrahend: &str) -> Self {
        self.derived.push(DerivedMetric {
            metric: metric.to_string(),
            minuend: minuend.to_string(),
            subtrahend: subtrahend.to_string(),
        });
        self
    }

    /// Layout of the campus energy sheet
    pub fn energy_sheet() -> Self {
        SheetLayout::new(4, 1)
            .column("htc179", 0)
            .column("htc232", 2)
            .column("totalGED", 3)
            .column("solarCapex", 4)
            .column(metric::SOLAR, 5)
            .column("solarOpex", 6)
            .column(metric::CONSUMPTION, 7)
            .column(metric::SOLAR_PERCENTAGE, 8)
            .column("c2kWh", 9)
            .column("c2SolarPercentage", 10)
            .column("rsPerKWh", 11)
            .column("savingsFrom1MWpSolar", 12)
            .column("savingsFromCapex", 13)
            .column(metric::TOTAL_SAVINGS, 14)
            .column(metric::SAVINGS, 15)
            .column("htc179Amount", 16)
            .column("htc232Amount", 17)
            .column("totalAmount", 18)
            .column(metric::PRICE, 19)
            .difference(metric::OTHER_SOURCES, metric::CONSUMPTION, metric::SOLAR)
    }

    /// Names of every metric this layout produces
    pub fn metric_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.metric.as_str())
            .chain(self.derived.iter().map(|d| d.metric.as_str()))
            .collect()
    }

    /// Convert rows into records.
    ///
    /// Rows whose date cell is blank or not a date (totals, notes) are
    /// skipped; cells that do not parse as numbers leave the metric absent
    /// for that month.
    pub fn map_rows<R: AsRef<[String]>>(&self, rows: &[R]) -> Result<Vec<HistoricalRecord>> {
        let mut records = Vec::new();

        for (index, row) in rows.iter().enumerate().skip(self.header_rows) {
            let row = row.as_ref();
            let raw_date = row.get(self.date_column).map(|s| s.trim()).unwrap_or("");
            if raw_date.is_empty() {
                debug!("Skipping sheet row {} without a date", index);
                continue;
            }

            let period: Period = match raw_date.parse() {
                Ok(period) => period,
                Err(e) => {
                    debug!("Skipping sheet row {}: {}", index, e);
                    continue;
                }
            };

            let mut record = HistoricalRecord::new(period);
            for mapping in &self.columns {
                if let Some(value) = row.get(mapping.column).and_then(|cell| parse_number(cell)) {
                    record.set_value(&mapping.metric, value);
                }
            }
            for derived in &self.derived {
                if let (Some(a), Some(b)) = (
                    record.value(&derived.minuend),
                    record.value(&derived.subtrahend),
                ) {
                    record.set_value(&derived.metric, a - b);
                }
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Convert the JSON array-of-arrays payload of the sheet endpoint
    pub fn map_json(&self, payload: &str) -> Result<Vec<HistoricalRecord>> {
        let rows: Vec<Vec<serde_json::Value>> = serde_json::from_str(payload)?;
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();
        self.map_rows(&rows)
    }
}

/// Text of a JSON cell; the endpoint mostly sends strings but numbers occur
fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Keep the records that fall in `year`
pub fn filter_year(records: &[HistoricalRecord], year: i32) -> Vec<HistoricalRecord> {
    records
        .iter()
        .filter(|r| r.period().year() == year)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_custom_layout() {
        let layout = SheetLayout::new(1, 0)
            .column("consumption", 1)
            .column("solar", 2)
            .difference("otherSources", "consumption", "solar");

        let rows = vec![
            row(&["Month", "Total", "Solar"]),
            row(&["2023-01", "1,000", "250"]),
            row(&["", "", ""]),
            row(&["2023-02", "900", "-"]),
        ];

        let records = layout.map_rows(&rows).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].value("consumption"), Some(1000.0));
        assert_eq!(records[0].value("otherSources"), Some(750.0));
        assert_eq!(records[1].value("solar"), None);
        assert_eq!(records[1].value("otherSources"), None);
    }

    #[test]
    fn test_short_rows_leave_metrics_absent() {
        let layout = SheetLayout::new(0, 0).column("price", 5);
        let records = layout.map_rows(&[row(&["2023-05", "1"])]).unwrap();
        assert_eq!(records[0].value("price"), None);
    }

    #[test]
    fn test_rows_without_a_date_are_skipped() {
        let layout = SheetLayout::new(0, 0).column("consumption", 1);
        let rows = vec![
            row(&["2023-01-01", "100"]),
            row(&["2023-02-01", "110"]),
            row(&["Total", "210"]),
        ];

        let records = layout.map_rows(&rows).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].period(), "2023-02".parse::<Period>().unwrap());
        assert_eq!(records[1].value("consumption"), Some(110.0));

        assert!(layout.map_rows(&[row(&["someday", "1"])]).unwrap().is_empty());
    }

    #[test]
    fn test_energy_sheet_metric_names() {
        let layout = SheetLayout::energy_sheet();
        let names = layout.metric_names();
        assert_eq!(names.len(), 20);
        assert!(names.contains(&metric::CONSUMPTION));
        assert!(names.contains(&metric::OTHER_SOURCES));
    }

    #[test]
    fn test_filter_year() {
        let records = vec![
            HistoricalRecord::new("2022-12".parse().unwrap()),
            HistoricalRecord::new("2023-01".parse().unwrap()),
        ];
        let filtered = filter_year(&records, 2023);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].period().year(), 2023);
    }
}
