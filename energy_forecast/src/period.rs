//! Calendar-month periods
//!
//! Every historical and predicted record covers exactly one calendar month.
//! `Period` orders chronologically and renders as `YYYY-MM`.

use crate::error::{ProjectionError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Full-date layouts seen in the energy sheet
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// One calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    // Field order gives chronological `Ord`
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period, validating the month number (1-12) and keeping the
    /// year within the range chrono can represent
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year) {
            return Err(ProjectionError::InvalidParameter(format!(
                "Year {} is out of range",
                year
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(ProjectionError::InvalidParameter(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// The month immediately after this one
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The `count` contiguous months following this one
    pub fn following(&self, count: usize) -> Vec<Period> {
        let mut periods = Vec::with_capacity(count);
        let mut current = *self;
        for _ in 0..count {
            current = current.next();
            periods.push(current);
        }
        periods
    }

    /// Signed number of months from `earlier` to `self`
    pub fn months_since(&self, earlier: &Period) -> i64 {
        (self.year as i64 - earlier.year as i64) * 12 + (self.month as i64 - earlier.month as i64)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ProjectionError::ParseError("Empty period".to_string()));
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(Self::from_date(date));
            }
        }

        // YYYY-MM
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }

        // "Jan 2023" or "January 2023"
        if let Ok(date) = NaiveDate::parse_from_str(&format!("1 {}", trimmed), "%d %B %Y") {
            return Ok(Self::from_date(date));
        }

        Err(ProjectionError::ParseError(format!(
            "Unrecognized period: {:?}",
            trimmed
        )))
    }
}

impl TryFrom<String> for Period {
    type Error = ProjectionError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
