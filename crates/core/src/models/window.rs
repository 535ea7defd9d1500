use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Rolling range used by the analytics view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Last 7 days up to now
    Week,
    /// Last calendar month up to now
    Month,
    /// Last year up to now
    Year,
    /// Everything since the epoch
    All,
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::Week => write!(f, "week"),
            TimeRange::Month => write!(f, "month"),
            TimeRange::Year => write!(f, "year"),
            TimeRange::All => write!(f, "all"),
        }
    }
}

/// Calendar period used by the report view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// Sunday-to-Saturday calendar week
    Week,
    /// Calendar month
    Month,
}

impl ReportPeriod {
    /// Minimum number of daily reviews expected in one period.
    pub fn review_floor(&self) -> usize {
        match self {
            ReportPeriod::Week => 5,
            ReportPeriod::Month => 20,
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportPeriod::Week => write!(f, "week"),
            ReportPeriod::Month => write!(f, "month"),
        }
    }
}

/// A resolved `[start, end]` window, both ends inclusive.
///
/// The offset of `start` is the caller's local time zone; calendar dates
/// (review dates, day buckets) are interpreted in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl DateWindow {
    /// Build a window, rejecting `start > end`.
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidWindow(format!(
                "start ({}) is after end ({})",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Whether an instant falls inside the window (inclusive on both ends).
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start.with_timezone(&Utc) && *instant <= self.end.with_timezone(&Utc)
    }

    /// Whether a calendar date, taken as local midnight, falls inside the window.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        let midnight = date.and_time(NaiveTime::MIN);
        match midnight.and_local_timezone(*self.start.offset()).single() {
            Some(local) => local >= self.start && local <= self.end,
            None => false,
        }
    }
}
