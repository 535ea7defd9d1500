use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::budget::BudgetItem;
use super::insight::Insight;
use super::window::{DateWindow, TimeRange};

// ── Trade outcome & P&L ─────────────────────────────────────────────

/// Counts and rates over a set of trades.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSummary {
    pub total_trades: usize,
    /// Trades with P&L > 0
    pub wins: usize,
    /// Trades with P&L < 0
    pub losses: usize,
    /// wins / total_trades × 100, 0 when there are no trades
    pub win_rate: f64,
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    /// Mean discipline score (absent scores count as 5)
    pub avg_discipline: f64,
    /// Share of trades that followed the plan, in percent
    pub followed_plan_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlSummary {
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub avg_win: f64,
    /// Absolute size of the average losing trade
    pub avg_loss: f64,
    /// avg_win / avg_loss, 0 when there are no losses
    pub risk_reward: f64,
}

// ── Time of day ─────────────────────────────────────────────────────

/// Fixed local-hour bands used to bucket trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TradingSession {
    /// 04:00-07:59
    EarlyMorning,
    /// 08:00-11:59
    Morning,
    /// 12:00-15:59
    Afternoon,
    /// 16:00-19:59
    Evening,
    /// 20:00-03:59
    Night,
}

impl TradingSession {
    /// All sessions in display order.
    pub const ALL: [TradingSession; 5] = [
        TradingSession::EarlyMorning,
        TradingSession::Morning,
        TradingSession::Afternoon,
        TradingSession::Evening,
        TradingSession::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            4..=7 => TradingSession::EarlyMorning,
            8..=11 => TradingSession::Morning,
            12..=15 => TradingSession::Afternoon,
            16..=19 => TradingSession::Evening,
            _ => TradingSession::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TradingSession::EarlyMorning => "Early Morning (4-8 AM)",
            TradingSession::Morning => "Morning (8-12 PM)",
            TradingSession::Afternoon => "Afternoon (12-4 PM)",
            TradingSession::Evening => "Evening (4-8 PM)",
            TradingSession::Night => "Night (8 PM-4 AM)",
        }
    }
}

impl std::fmt::Display for TradingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayBucket {
    pub session: TradingSession,
    pub count: usize,
    pub wins: usize,
    pub losses: usize,
    pub pnl: f64,
    pub win_rate: f64,
}

/// The session with the highest win rate among those with enough samples.
/// `period` is empty when no session qualifies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestTradingTime {
    pub period: String,
    pub win_rate: f64,
    pub pnl: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayStats {
    /// One bucket per session, in `TradingSession::ALL` order
    pub buckets: Vec<TimeOfDayBucket>,
    pub best_trading_time: BestTradingTime,
}

// ── Risk ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LossStreakStats {
    /// Longest run of losing trades over the whole set
    pub max_consecutive_losses: usize,
    /// Losing run at the end of the last 10 trades
    pub current_losing_streak: usize,
    /// Mean length of all completed losing runs
    pub avg_loss_streak: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownStats {
    /// Largest peak-to-trough decline of cumulative P&L
    pub max_drawdown: f64,
    /// Decline from the peak after the last trade
    pub current_drawdown: f64,
    /// Highest cumulative P&L reached (never below 0)
    pub peak: f64,
    /// Gain needed to get back to the peak, in percent
    pub recovery_needed: f64,
}

/// Stop-trading alerts driven by the configured limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAlerts {
    /// Losing trades in a row, counting back from the most recent trade
    pub consecutive_losses: usize,
    pub max_consecutive_losses: u32,
    pub consecutive_loss_limit_reached: bool,
    /// Net P&L of trades created today
    pub today_pnl: f64,
    pub max_daily_loss: f64,
    pub daily_loss_limit_reached: bool,
}

// ── Series ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPnl {
    /// `YYYY-MM`
    pub month: String,
    /// e.g. "Jan 24"
    pub label: String,
    pub pnl: f64,
    pub trades: usize,
    pub wins: usize,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPnl {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon"
    pub day: String,
    pub pnl: f64,
    pub trades: usize,
    pub wins: usize,
    pub win_rate: f64,
}

// ── Psychology ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionStat {
    pub emotion: String,
    pub count: usize,
    pub wins: usize,
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub win_rate: f64,
    pub avg_pnl: f64,
    pub avg_discipline: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionStats {
    /// Sorted by win rate, highest first
    pub stats: Vec<EmotionStat>,
    pub best_emotion: Option<EmotionStat>,
    pub worst_emotion: Option<EmotionStat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationBucket {
    pub pnl: f64,
    pub wins: usize,
    pub total: usize,
    pub days: usize,
    pub win_rate: f64,
    /// Average P&L per trading day
    pub avg_pnl: f64,
}

/// Trading results split by how the day's review was scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitTradeCorrelation {
    pub high_discipline_days: CorrelationBucket,
    pub low_discipline_days: CorrelationBucket,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyStat {
    pub wins: usize,
    pub losses: usize,
    pub pnl: f64,
}

impl StrategyStat {
    /// wins / (wins + losses) × 100
    pub fn win_rate(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            0.0
        } else {
            self.wins as f64 / decided as f64 * 100.0
        }
    }
}

/// Per-emotion tally as it appears in the period report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionTally {
    pub count: usize,
    pub wins: usize,
    pub pnl: f64,
}

// ── Habits, goals, budget, reviews ──────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    pub total_active: usize,
    pub completed_today: usize,
    /// completed_today / total_active × 100
    pub completion_rate: f64,
    /// Mean current streak over active habits
    pub avg_streak: f64,
    /// Highest current streak over all habits
    pub best_current_streak: u32,
    /// Highest longest-streak over all habits
    pub max_streak: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStats {
    pub active: usize,
    pub completed: usize,
    /// Mean progress of active goals, in percent
    pub avg_progress: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStats {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_cash_flow: f64,
    /// Unpaid expenses due within the next 7 days (or overdue)
    pub upcoming_payments: Vec<BudgetItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub reviews_completed: usize,
    pub avg_mood: f64,
    pub avg_energy: f64,
    pub avg_overall: f64,
    /// First five wins across the reviews
    pub top_wins: Vec<String>,
    /// First five improvement notes across the reviews
    pub top_improvements: Vec<String>,
}

// ── Composite views ─────────────────────────────────────────────────

/// Everything the analytics view shows for one rolling range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub range: TimeRange,
    pub window: DateWindow,
    pub summary: TradeSummary,
    pub pnl: PnlSummary,
    pub time_of_day: TimeOfDayStats,
    pub loss_streaks: LossStreakStats,
    pub drawdown: DrawdownStats,
    pub monthly_pnl: Vec<MonthlyPnl>,
    pub weekly_pnl: Vec<DailyPnl>,
    pub emotions: EmotionStats,
    pub habit_correlation: HabitTradeCorrelation,
    pub strategy_stats: BTreeMap<String, StrategyStat>,
    pub habits: HabitStats,
    pub goals: GoalStats,
    pub insights: Vec<Insight>,
}

/// Headline numbers over the whole journal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_trades: usize,
    pub win_rate: f64,
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    #[serde(rename = "weeklyPnL")]
    pub weekly_pnl: f64,
    pub weekly_trades: usize,
    pub avg_discipline_score: f64,
    pub current_habit_streak: u32,
    pub longest_habit_streak: u32,
    pub habits_completed_today: usize,
    pub total_habits: usize,
    pub goals_progress: f64,
    /// Weighted composite: habits 30%, win rate 25%, discipline 25%, goals 20%
    pub identity_score: u32,
}
