use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Timelike};
use std::borrow::Borrow;
use std::collections::BTreeMap;

use crate::models::analytics::{
    BestTradingTime, DailyPnl, MonthlyPnl, TimeOfDayBucket, TimeOfDayStats, TradingSession,
};
use crate::models::trade::Trade;
use crate::services::trade_stats_service::percent;

/// Trades a session needs before it can be the best trading time.
pub const MIN_SESSION_SAMPLES: usize = 3;

/// Months kept in the monthly series.
pub const MONTHLY_SERIES_LEN: usize = 12;

/// Days in the weekly series, today included.
pub const WEEKLY_SERIES_LEN: i64 = 7;

/// When trades happen: time-of-day sessions and calendar series.
pub struct TimingService;

impl TimingService {
    pub fn new() -> Self {
        Self
    }

    /// Bucket trades by local hour of entry (creation time when no entry time
    /// was recorded).
    pub fn time_of_day<T: Borrow<Trade>>(&self, trades: &[T], offset: &FixedOffset) -> TimeOfDayStats {
        let mut buckets: Vec<TimeOfDayBucket> = TradingSession::ALL
            .iter()
            .map(|&session| TimeOfDayBucket {
                session,
                count: 0,
                wins: 0,
                losses: 0,
                pnl: 0.0,
                win_rate: 0.0,
            })
            .collect();

        for trade in trades.iter().map(Borrow::borrow) {
            let hour = match trade.entry_date {
                Some(entry) => entry.local(offset).hour(),
                None => trade.created_at.with_timezone(offset).hour(),
            };
            let session = TradingSession::from_hour(hour);
            if let Some(bucket) = buckets.iter_mut().find(|b| b.session == session) {
                bucket.count += 1;
                bucket.pnl += trade.pnl();
                if trade.is_win() {
                    bucket.wins += 1;
                } else if trade.is_loss() {
                    bucket.losses += 1;
                }
            }
        }

        let mut best = BestTradingTime::default();
        let mut best_found = false;
        for bucket in &mut buckets {
            bucket.win_rate = percent(bucket.wins, bucket.count);
            if bucket.count < MIN_SESSION_SAMPLES {
                continue;
            }
            let better = !best_found
                || bucket.win_rate > best.win_rate
                || (bucket.win_rate == best.win_rate && bucket.pnl > best.pnl);
            if better {
                best = BestTradingTime {
                    period: bucket.session.label().to_string(),
                    win_rate: bucket.win_rate,
                    pnl: bucket.pnl,
                };
                best_found = true;
            }
        }

        TimeOfDayStats {
            buckets,
            best_trading_time: best,
        }
    }

    /// P&L per local calendar month, the most recent twelve, oldest first.
    pub fn monthly_pnl<T: Borrow<Trade>>(&self, trades: &[T], offset: &FixedOffset) -> Vec<MonthlyPnl> {
        let mut months: BTreeMap<NaiveDate, (f64, usize, usize)> = BTreeMap::new();
        for trade in trades.iter().map(Borrow::borrow) {
            let local = trade.created_at.with_timezone(offset).date_naive();
            let Some(first) = local.with_day(1) else {
                continue;
            };
            let entry = months.entry(first).or_insert((0.0, 0, 0));
            entry.0 += trade.pnl();
            entry.1 += 1;
            if trade.is_win() {
                entry.2 += 1;
            }
        }

        let skip = months.len().saturating_sub(MONTHLY_SERIES_LEN);
        months
            .into_iter()
            .skip(skip)
            .map(|(first, (pnl, count, wins))| MonthlyPnl {
                month: first.format("%Y-%m").to_string(),
                label: first.format("%b %y").to_string(),
                pnl,
                trades: count,
                wins,
                win_rate: percent(wins, count),
            })
            .collect()
    }

    /// P&L for each of the last seven local calendar days, today last.
    pub fn weekly_pnl<T: Borrow<Trade>>(&self, trades: &[T], now: DateTime<FixedOffset>) -> Vec<DailyPnl> {
        let today = now.date_naive();
        (0..WEEKLY_SERIES_LEN)
            .rev()
            .map(|back| {
                let date = today - Duration::days(back);
                let mut day = DailyPnl {
                    date,
                    day: date.format("%a").to_string(),
                    pnl: 0.0,
                    trades: 0,
                    wins: 0,
                    win_rate: 0.0,
                };
                for trade in trades.iter().map(Borrow::borrow) {
                    if trade.created_at.with_timezone(now.offset()).date_naive() != date {
                        continue;
                    }
                    day.pnl += trade.pnl();
                    day.trades += 1;
                    if trade.is_win() {
                        day.wins += 1;
                    }
                }
                day.win_rate = percent(day.wins, day.trades);
                day
            })
            .collect()
    }
}

impl Default for TimingService {
    fn default() -> Self {
        Self::new()
    }
}
