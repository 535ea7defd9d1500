use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::budget::BudgetItem;
use super::goal::Goal;
use super::habit::Habit;
use super::mindset::MindsetLog;
use super::review::DailyReview;
use super::settings::Settings;
use super::trade::Trade;

/// Version tag written into JSON backups.
pub const BACKUP_VERSION: &str = "1.0";

/// The main data container: every collection plus settings.
///
/// Handed to the analytics layer as a read-only snapshot; only the
/// journal service mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    #[serde(default)]
    pub habits: Vec<Habit>,

    #[serde(default)]
    pub trades: Vec<Trade>,

    #[serde(default)]
    pub goals: Vec<Goal>,

    #[serde(default)]
    pub budget_items: Vec<BudgetItem>,

    /// Newest first
    #[serde(default)]
    pub daily_reviews: Vec<DailyReview>,

    #[serde(default)]
    pub mindset_logs: Vec<MindsetLog>,

    #[serde(default)]
    pub settings: Settings,
}

/// Full export of a journal, as written by "export backup".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub export_date: DateTime<FixedOffset>,
    pub version: String,
    #[serde(flatten)]
    pub journal: Journal,
}
