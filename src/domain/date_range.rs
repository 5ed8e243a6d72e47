//! Half-open calendar date range used by the availability queries.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::config::DATE_FORMAT;
use crate::errors::{AppError, AppResult};

/// A `[start, end)` range of calendar days.
///
/// Construction guarantees `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting empty or inverted ones.
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start >= end {
            return Err(AppError::validation("start date must be before end date"));
        }
        Ok(Self { start, end })
    }

    /// Parse a pair of `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        let start = NaiveDate::parse_from_str(start, DATE_FORMAT).map_err(|e| {
            tracing::debug!("start date {:?} rejected: {}", start, e);
            AppError::validation("invalid start date")
        })?;
        let end = NaiveDate::parse_from_str(end, DATE_FORMAT).map_err(|e| {
            tracing::debug!("end date {:?} rejected: {}", end, e);
            AppError::validation("invalid end date")
        })?;

        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Two ranges overlap iff `a.start < b.end && a.end > b.start`.
    ///
    /// Ranges that only touch at a boundary day do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Start of the range as a stored timestamp (midnight UTC).
    pub fn start_at(&self) -> DateTime<Utc> {
        midnight_utc(self.start)
    }

    /// End of the range as a stored timestamp (midnight UTC).
    pub fn end_at(&self) -> DateTime<Utc> {
        midnight_utc(self.end)
    }
}

/// Timestamp stored for a calendar day.
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
