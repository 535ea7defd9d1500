use chrono::{DateTime, FixedOffset};
use std::borrow::Borrow;

use crate::models::analytics::{DrawdownStats, LossStreakStats, RiskAlerts};
use crate::models::settings::Settings;
use crate::models::trade::Trade;

/// Number of most recent trades the current losing streak looks at.
pub const RECENT_TRADES_WINDOW: usize = 10;

/// Added to the recovery denominator so a peak of 0 cannot divide by zero.
pub const RECOVERY_EPSILON: f64 = 0.01;

/// Loss streaks, drawdown and stop-trading alerts.
pub struct RiskService;

impl RiskService {
    pub fn new() -> Self {
        Self
    }

    /// Scans trades in chronological order.
    ///
    /// Any trade with P&L >= 0 ends a losing run; a run still open after the
    /// last trade counts as completed. The current streak is measured only
    /// over the last ten trades, counting back from the most recent one.
    pub fn loss_streaks<T: Borrow<Trade>>(&self, trades: &[T]) -> LossStreakStats {
        let sorted = chronological(trades);

        let mut streaks: Vec<usize> = Vec::new();
        let mut running = 0usize;
        for trade in &sorted {
            if trade.is_loss() {
                running += 1;
            } else {
                if running > 0 {
                    streaks.push(running);
                }
                running = 0;
            }
        }
        if running > 0 {
            streaks.push(running);
        }

        let recent_start = sorted.len().saturating_sub(RECENT_TRADES_WINDOW);
        let current_losing_streak = sorted[recent_start..]
            .iter()
            .rev()
            .take_while(|t| t.is_loss())
            .count();

        let max_consecutive_losses = streaks.iter().copied().max().unwrap_or(0);
        let avg_loss_streak = if streaks.is_empty() {
            0.0
        } else {
            streaks.iter().sum::<usize>() as f64 / streaks.len() as f64
        };

        LossStreakStats {
            max_consecutive_losses,
            current_losing_streak,
            avg_loss_streak,
        }
    }

    /// Peak-to-trough decline of cumulative P&L in chronological order.
    ///
    /// The peak starts at 0, so an account that only ever loses still shows
    /// its full decline as drawdown.
    pub fn drawdown<T: Borrow<Trade>>(&self, trades: &[T]) -> DrawdownStats {
        let mut peak = 0.0_f64;
        let mut cumulative = 0.0_f64;
        let mut current = 0.0_f64;
        let mut max = 0.0_f64;

        for trade in chronological(trades) {
            cumulative += trade.pnl();
            if cumulative > peak {
                peak = cumulative;
                current = 0.0;
            } else {
                current = peak - cumulative;
                max = max.max(current);
            }
        }

        let recovery_needed = if current > 0.0 {
            current / (peak - current + RECOVERY_EPSILON) * 100.0
        } else {
            0.0
        };

        DrawdownStats {
            max_drawdown: max,
            current_drawdown: current,
            peak,
            recovery_needed,
        }
    }

    /// Compare the journal's recent results against the configured limits.
    ///
    /// `trades` should be the full history; the consecutive count walks back
    /// from the most recent trade and today's P&L uses `now`'s calendar date.
    pub fn risk_alerts<T: Borrow<Trade>>(
        &self,
        trades: &[T],
        settings: &Settings,
        now: DateTime<FixedOffset>,
    ) -> RiskAlerts {
        let sorted = chronological(trades);
        let consecutive_losses = sorted.iter().rev().take_while(|t| t.is_loss()).count();

        let today = now.date_naive();
        let today_pnl: f64 = sorted
            .iter()
            .filter(|t| t.created_at.with_timezone(now.offset()).date_naive() == today)
            .map(|t| t.pnl())
            .sum();

        let max_consecutive_losses = settings.max_consecutive_losses;
        let consecutive_loss_limit_reached =
            max_consecutive_losses > 0 && consecutive_losses >= max_consecutive_losses as usize;
        let daily_loss_limit_reached =
            settings.max_daily_loss > 0.0 && today_pnl <= -settings.max_daily_loss;

        if consecutive_loss_limit_reached || daily_loss_limit_reached {
            tracing::warn!(
                consecutive_losses,
                today_pnl,
                "risk limit reached"
            );
        }

        RiskAlerts {
            consecutive_losses,
            max_consecutive_losses,
            consecutive_loss_limit_reached,
            today_pnl,
            max_daily_loss: settings.max_daily_loss,
            daily_loss_limit_reached,
        }
    }
}

impl Default for RiskService {
    fn default() -> Self {
        Self::new()
    }
}

/// Trades ordered by `created_at`, oldest first. Equal timestamps keep input order.
pub(crate) fn chronological<T: Borrow<Trade>>(trades: &[T]) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().map(Borrow::borrow).collect();
    sorted.sort_by_key(|t| t.created_at);
    sorted
}
