use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};
use std::borrow::Borrow;

use crate::errors::CoreError;
use crate::models::review::DailyReview;
use crate::models::trade::Trade;
use crate::models::window::{DateWindow, ReportPeriod, TimeRange};

/// Resolves symbolic periods into concrete windows and selects the records
/// that fall inside them.
///
/// "Now" is always passed in; its offset is the local time zone used for
/// calendar boundaries.
pub struct WindowService;

impl WindowService {
    pub fn new() -> Self {
        Self
    }

    /// Rolling window ending at `now`.
    ///
    /// - `Week`: `now - 7 days`
    /// - `Month`: same day-of-month one calendar month earlier (clamped to month end)
    /// - `Year`: one year earlier
    /// - `All`: the Unix epoch
    pub fn resolve_range(
        &self,
        range: TimeRange,
        now: DateTime<FixedOffset>,
    ) -> Result<DateWindow, CoreError> {
        let start = match range {
            TimeRange::Week => now - Duration::days(7),
            TimeRange::Month => now
                .checked_sub_months(Months::new(1))
                .ok_or_else(|| out_of_range("month", now))?,
            TimeRange::Year => now
                .checked_sub_months(Months::new(12))
                .ok_or_else(|| out_of_range("year", now))?,
            TimeRange::All => Utc
                .timestamp_opt(0, 0)
                .single()
                .ok_or_else(|| CoreError::InvalidWindow("epoch is not representable".into()))?
                .with_timezone(now.offset()),
        };

        let window = DateWindow::new(start, now)?;
        tracing::debug!(%range, start = %window.start, end = %window.end, "resolved rolling window");
        Ok(window)
    }

    /// Calendar window for the report view.
    ///
    /// `offset` counts periods back from the current one (0 = current,
    /// -1 = previous). Positive offsets are clamped to 0 so a report never
    /// covers the future.
    ///
    /// Weeks run Sunday 00:00:00.000 through Saturday 23:59:59.999; months run
    /// from the 1st 00:00:00.000 through the last day 23:59:59.999.
    pub fn resolve_report_window(
        &self,
        period: ReportPeriod,
        offset: i32,
        now: DateTime<FixedOffset>,
    ) -> Result<DateWindow, CoreError> {
        let offset = offset.min(0);
        let today = now.date_naive();

        let (first_day, last_day) = match period {
            ReportPeriod::Week => {
                let since_sunday = i64::from(today.weekday().num_days_from_sunday());
                let start = today - Duration::days(since_sunday) + Duration::weeks(i64::from(offset));
                (start, start + Duration::days(6))
            }
            ReportPeriod::Month => {
                let this_month = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
                    .ok_or_else(|| out_of_range("month", now))?;
                let start = this_month
                    .checked_sub_months(Months::new(offset.unsigned_abs()))
                    .ok_or_else(|| out_of_range("month", now))?;
                let next = start
                    .checked_add_months(Months::new(1))
                    .ok_or_else(|| out_of_range("month", now))?;
                (start, next - Duration::days(1))
            }
        };

        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .ok_or_else(|| CoreError::InvalidWindow("invalid end-of-day time".into()))?;
        let start = local(first_day.and_time(NaiveTime::MIN), now.offset())?;
        let end = local(last_day.and_time(end_of_day), now.offset())?;

        let window = DateWindow::new(start, end)?;
        tracing::debug!(%period, offset, start = %window.start, end = %window.end, "resolved report window");
        Ok(window)
    }

    /// Trades whose `created_at` lies inside the window. Input order is kept.
    pub fn filter_trades<'a, T: Borrow<Trade>>(
        &self,
        trades: &'a [T],
        window: &DateWindow,
    ) -> Vec<&'a Trade> {
        trades
            .iter()
            .map(Borrow::borrow)
            .filter(|t| window.contains(&t.created_at))
            .collect()
    }

    /// Reviews whose `review_date` (local midnight) lies inside the window.
    pub fn filter_reviews<'a, R: Borrow<DailyReview>>(
        &self,
        reviews: &'a [R],
        window: &DateWindow,
    ) -> Vec<&'a DailyReview> {
        reviews
            .iter()
            .map(Borrow::borrow)
            .filter(|r| window.contains_date(r.review_date))
            .collect()
    }
}

impl Default for WindowService {
    fn default() -> Self {
        Self::new()
    }
}

fn local(naive: NaiveDateTime, offset: &FixedOffset) -> Result<DateTime<FixedOffset>, CoreError> {
    naive
        .and_local_timezone(*offset)
        .single()
        .ok_or_else(|| CoreError::InvalidWindow(format!("{naive} is not representable at {offset}")))
}

fn out_of_range(what: &str, now: DateTime<FixedOffset>) -> CoreError {
    CoreError::InvalidWindow(format!("{what} boundary out of range for {}", now.to_rfc3339()))
}
