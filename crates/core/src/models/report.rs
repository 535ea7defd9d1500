use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::analytics::{EmotionTally, ReviewStats, StrategyStat};
use super::trade::Trade;
use super::window::{DateWindow, ReportPeriod};

/// Weekly/monthly report, exported as a standalone JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub period: ReportPeriod,
    pub date_range: DateWindow,
    pub trading: TradingReport,
    pub habits: HabitReport,
    pub reviews: ReviewStats,
    pub insights: Vec<String>,
    pub generated_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingReport {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub avg_discipline: f64,
    pub followed_plan_rate: f64,
    pub best_trade: Option<Trade>,
    pub worst_trade: Option<Trade>,
    pub strategy_stats: BTreeMap<String, StrategyStat>,
    pub emotion_stats: BTreeMap<String, EmotionTally>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitReport {
    pub total_active: usize,
    pub avg_streak: f64,
    pub max_streak: u32,
}
