use chrono::{FixedOffset, NaiveDate};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};

use crate::models::analytics::{CorrelationBucket, HabitTradeCorrelation};
use crate::models::review::{DailyReview, DEFAULT_REVIEW_SCORE};
use crate::models::trade::Trade;
use crate::services::trade_stats_service::{mean, percent};

/// Review score from which a trading day counts as high discipline.
pub const HIGH_DISCIPLINE_SCORE: f64 = 7.0;

/// Relates daily trading results to how the day was reviewed.
pub struct CorrelationService;

impl CorrelationService {
    pub fn new() -> Self {
        Self
    }

    /// Split trading days by the matching review's overall score.
    ///
    /// Days are local calendar dates of `created_at`. A day without a review
    /// scores 5 and lands in the low bucket.
    pub fn habit_trade_correlation<T, R>(
        &self,
        trades: &[T],
        reviews: &[R],
        offset: &FixedOffset,
    ) -> HabitTradeCorrelation
    where
        T: Borrow<Trade>,
        R: Borrow<DailyReview>,
    {
        let mut days: BTreeMap<NaiveDate, (f64, usize, usize)> = BTreeMap::new();
        for trade in trades.iter().map(Borrow::borrow) {
            let date = trade.created_at.with_timezone(offset).date_naive();
            let day = days.entry(date).or_insert((0.0, 0, 0));
            day.0 += trade.pnl();
            day.1 += 1;
            if trade.is_win() {
                day.2 += 1;
            }
        }

        let scores: HashMap<NaiveDate, f64> = reviews
            .iter()
            .map(Borrow::borrow)
            .map(|r| (r.review_date, r.overall()))
            .collect();

        let mut high = CorrelationBucket::default();
        let mut low = CorrelationBucket::default();
        for (date, (pnl, total, wins)) in days {
            let score = scores
                .get(&date)
                .copied()
                .unwrap_or(f64::from(DEFAULT_REVIEW_SCORE));
            let bucket = if score >= HIGH_DISCIPLINE_SCORE { &mut high } else { &mut low };
            bucket.pnl += pnl;
            bucket.total += total;
            bucket.wins += wins;
            bucket.days += 1;
        }

        for bucket in [&mut high, &mut low] {
            bucket.win_rate = percent(bucket.wins, bucket.total);
            bucket.avg_pnl = mean(bucket.pnl, bucket.days);
        }

        HabitTradeCorrelation {
            high_discipline_days: high,
            low_discipline_days: low,
        }
    }
}

impl Default for CorrelationService {
    fn default() -> Self {
        Self::new()
    }
}
