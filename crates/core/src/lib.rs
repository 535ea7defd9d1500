pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use models::{
    analytics::{AnalyticsOverview, BudgetStats, DashboardSummary, RiskAlerts},
    budget::BudgetItem,
    goal::{Goal, GoalStatus},
    habit::Habit,
    journal::Journal,
    mindset::MindsetLog,
    report::PeriodReport,
    review::DailyReview,
    settings::Settings,
    trade::Trade,
    window::{ReportPeriod, TimeRange},
};
use services::{
    export_service::ExportService,
    journal_service::{JournalService, ReviewUpsert, TradeQuery},
    progress_service::ProgressService,
    report_service::ReportService,
    risk_service::RiskService,
};
use std::collections::BTreeSet;
use storage::{
    manager::StorageManager,
    repository::{Collection, JournalRepository},
};

use errors::CoreError;

/// Main entry point for the trader journal core library.
/// Holds the journal snapshot and the services that operate on it.
///
/// Every time-dependent call takes `now` explicitly; its offset is the
/// user's local time zone.
#[must_use]
pub struct TradingJournal {
    journal: Journal,
    journal_service: JournalService,
    report_service: ReportService,
    risk_service: RiskService,
    progress_service: ProgressService,
    export_service: ExportService,
    /// Collections modified since the last save/load.
    dirty: BTreeSet<Collection>,
}

impl std::fmt::Debug for TradingJournal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingJournal")
            .field("trades", &self.journal.trades.len())
            .field("habits", &self.journal.habits.len())
            .field("reviews", &self.journal.daily_reviews.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for TradingJournal {
    fn default() -> Self {
        Self::create_new()
    }
}

impl TradingJournal {
    /// Empty journal with default settings.
    pub fn create_new() -> Self {
        Self::build(Journal::default())
    }

    /// Wrap an existing snapshot (nothing is marked dirty).
    pub fn from_journal(journal: Journal) -> Self {
        Self::build(journal)
    }

    /// Read every collection from a repository.
    pub async fn load(repo: &dyn JournalRepository) -> Result<Self, CoreError> {
        let journal = StorageManager::load_journal(repo).await?;
        Ok(Self::build(journal))
    }

    /// Write the collections changed since the last save or load.
    /// Returns the collections that were written.
    pub async fn save(&mut self, repo: &dyn JournalRepository) -> Result<Vec<Collection>, CoreError> {
        let pending: Vec<Collection> = self.dirty.iter().copied().collect();
        for collection in &pending {
            StorageManager::save_collection(repo, &self.journal, *collection).await?;
            self.dirty.remove(collection);
        }
        Ok(pending)
    }

    /// Write every collection regardless of dirty state.
    pub async fn save_all(&mut self, repo: &dyn JournalRepository) -> Result<(), CoreError> {
        StorageManager::save_journal(repo, &self.journal).await?;
        self.dirty.clear();
        Ok(())
    }

    fn build(journal: Journal) -> Self {
        Self {
            journal,
            journal_service: JournalService::new(),
            report_service: ReportService::new(),
            risk_service: RiskService::new(),
            progress_service: ProgressService::new(),
            export_service: ExportService::new(),
            dirty: BTreeSet::new(),
        }
    }

    /// Read-only snapshot handed to the analytics layer.
    #[must_use]
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    // ── Trades ──────────────────────────────────────────────────────

    /// Add a trade. Returns its id.
    pub fn add_trade(&mut self, trade: Trade) -> Result<String, CoreError> {
        let id = trade.id.clone();
        self.journal_service.add_trade(&mut self.journal, trade)?;
        self.dirty.insert(Collection::Trades);
        Ok(id)
    }

    pub fn update_trade(&mut self, trade: Trade) -> Result<(), CoreError> {
        self.journal_service.update_trade(&mut self.journal, trade)?;
        self.dirty.insert(Collection::Trades);
        Ok(())
    }

    pub fn remove_trade(&mut self, id: &str) -> Result<Trade, CoreError> {
        let removed = self.journal_service.remove_trade(&mut self.journal, id)?;
        self.dirty.insert(Collection::Trades);
        Ok(removed)
    }

    #[must_use]
    pub fn get_trade(&self, id: &str) -> Option<&Trade> {
        self.journal.trades.iter().find(|t| t.id == id)
    }

    /// All trades, newest first.
    #[must_use]
    pub fn get_trades(&self) -> Vec<&Trade> {
        self.search_trades(&TradeQuery::default())
    }

    #[must_use]
    pub fn search_trades(&self, query: &TradeQuery) -> Vec<&Trade> {
        self.journal_service.search_trades(&self.journal, query)
    }

    #[must_use]
    pub fn trade_count(&self) -> usize {
        self.journal.trades.len()
    }

    // ── Daily reviews ───────────────────────────────────────────────

    /// Insert or replace the review for its date.
    pub fn save_review(&mut self, review: DailyReview) -> Result<ReviewUpsert, CoreError> {
        let outcome = self.journal_service.save_review(&mut self.journal, review)?;
        self.dirty.insert(Collection::DailyReviews);
        Ok(outcome)
    }

    #[must_use]
    pub fn review_for(&self, date: NaiveDate) -> Option<&DailyReview> {
        self.journal_service.review_for(&self.journal, date)
    }

    /// All reviews, newest first.
    #[must_use]
    pub fn get_reviews(&self) -> &[DailyReview] {
        &self.journal.daily_reviews
    }

    pub fn remove_review(&mut self, id: &str) -> Result<DailyReview, CoreError> {
        let removed = self.journal_service.remove_review(&mut self.journal, id)?;
        self.dirty.insert(Collection::DailyReviews);
        Ok(removed)
    }

    // ── Habits ──────────────────────────────────────────────────────

    pub fn add_habit(&mut self, habit: Habit) -> Result<String, CoreError> {
        let id = habit.id.clone();
        self.journal_service.add_habit(&mut self.journal, habit)?;
        self.dirty.insert(Collection::Habits);
        Ok(id)
    }

    /// Flip today's completion of a habit. Returns the new state.
    pub fn toggle_habit(&mut self, id: &str) -> Result<bool, CoreError> {
        let completed = self.journal_service.toggle_habit(&mut self.journal, id)?;
        self.dirty.insert(Collection::Habits);
        Ok(completed)
    }

    pub fn remove_habit(&mut self, id: &str) -> Result<Habit, CoreError> {
        let removed = self.journal_service.remove_habit(&mut self.journal, id)?;
        self.dirty.insert(Collection::Habits);
        Ok(removed)
    }

    pub fn reset_streaks(&mut self) {
        self.journal_service.reset_streaks(&mut self.journal);
        self.dirty.insert(Collection::Habits);
    }

    #[must_use]
    pub fn get_habits(&self) -> &[Habit] {
        &self.journal.habits
    }

    // ── Goals ───────────────────────────────────────────────────────

    pub fn add_goal(&mut self, goal: Goal) -> Result<String, CoreError> {
        let id = goal.id.clone();
        self.journal_service.add_goal(&mut self.journal, goal)?;
        self.dirty.insert(Collection::Goals);
        Ok(id)
    }

    pub fn update_goal_progress(
        &mut self,
        id: &str,
        current_value: f64,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        self.journal_service
            .update_goal_progress(&mut self.journal, id, current_value, now)?;
        self.dirty.insert(Collection::Goals);
        Ok(())
    }

    pub fn set_goal_status(&mut self, id: &str, status: GoalStatus, now: DateTime<Utc>) -> Result<(), CoreError> {
        self.journal_service
            .set_goal_status(&mut self.journal, id, status, now)?;
        self.dirty.insert(Collection::Goals);
        Ok(())
    }

    pub fn remove_goal(&mut self, id: &str) -> Result<Goal, CoreError> {
        let removed = self.journal_service.remove_goal(&mut self.journal, id)?;
        self.dirty.insert(Collection::Goals);
        Ok(removed)
    }

    #[must_use]
    pub fn get_goals(&self) -> &[Goal] {
        &self.journal.goals
    }

    // ── Budget ──────────────────────────────────────────────────────

    pub fn add_budget_item(&mut self, item: BudgetItem) -> Result<String, CoreError> {
        let id = item.id.clone();
        self.journal_service.add_budget_item(&mut self.journal, item)?;
        self.dirty.insert(Collection::Budget);
        Ok(id)
    }

    pub fn toggle_budget_paid(&mut self, id: &str) -> Result<bool, CoreError> {
        let paid = self.journal_service.toggle_budget_paid(&mut self.journal, id)?;
        self.dirty.insert(Collection::Budget);
        Ok(paid)
    }

    pub fn remove_budget_item(&mut self, id: &str) -> Result<BudgetItem, CoreError> {
        let removed = self.journal_service.remove_budget_item(&mut self.journal, id)?;
        self.dirty.insert(Collection::Budget);
        Ok(removed)
    }

    #[must_use]
    pub fn budget_stats(&self, now: DateTime<FixedOffset>) -> BudgetStats {
        self.progress_service
            .budget_stats(&self.journal.budget_items, now.date_naive())
    }

    // ── Mindset ─────────────────────────────────────────────────────

    pub fn add_mindset_log(&mut self, log: MindsetLog) -> Result<String, CoreError> {
        let id = log.id.clone();
        self.journal_service.add_mindset_log(&mut self.journal, log)?;
        self.dirty.insert(Collection::MindsetLogs);
        Ok(id)
    }

    /// Check-ins, newest first.
    #[must_use]
    pub fn get_mindset_logs(&self) -> &[MindsetLog] {
        &self.journal.mindset_logs
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.journal.settings
    }

    pub fn update_settings(&mut self, settings: Settings) -> Result<(), CoreError> {
        self.journal_service.update_settings(&mut self.journal, settings)?;
        self.dirty.insert(Collection::Settings);
        Ok(())
    }

    /// Whether every active pre-trade rule is ticked.
    #[must_use]
    pub fn checklist_complete<'a>(&self, checked: impl IntoIterator<Item = &'a str>) -> bool {
        self.journal.settings.checklist_complete(checked)
    }

    // ── Analytics ───────────────────────────────────────────────────

    pub fn analytics(&self, range: TimeRange, now: DateTime<FixedOffset>) -> Result<AnalyticsOverview, CoreError> {
        self.report_service.analytics_overview(&self.journal, range, now)
    }

    /// Weekly/monthly report, `offset` periods back (0 = current).
    pub fn report(
        &self,
        period: ReportPeriod,
        offset: i32,
        now: DateTime<FixedOffset>,
    ) -> Result<PeriodReport, CoreError> {
        self.report_service.period_report(&self.journal, period, offset, now)
    }

    #[must_use]
    pub fn dashboard(&self, now: DateTime<FixedOffset>) -> DashboardSummary {
        self.report_service.dashboard(&self.journal, now)
    }

    #[must_use]
    pub fn risk_alerts(&self, now: DateTime<FixedOffset>) -> RiskAlerts {
        self.risk_service
            .risk_alerts(&self.journal.trades, &self.journal.settings, now)
    }

    // ── Export & Import ─────────────────────────────────────────────

    pub fn export_report_json(
        &self,
        period: ReportPeriod,
        offset: i32,
        now: DateTime<FixedOffset>,
    ) -> Result<String, CoreError> {
        let report = self.report(period, offset, now)?;
        self.report_service.export_report_json(&report)
    }

    pub fn export_trades_csv(&self, now: DateTime<FixedOffset>) -> Result<String, CoreError> {
        self.export_service.trades_csv(&self.journal.trades, now.offset())
    }

    pub fn export_reviews_csv(&self) -> Result<String, CoreError> {
        self.export_service.reviews_csv(&self.journal.daily_reviews)
    }

    pub fn export_backup(&self, now: DateTime<FixedOffset>) -> Result<String, CoreError> {
        self.export_service.backup_json(&self.journal, now)
    }

    /// Replace every collection with the contents of a backup.
    pub fn import_backup(&mut self, json: &str) -> Result<(), CoreError> {
        let backup = self.export_service.parse_backup(json)?;
        tracing::info!(
            version = %backup.version,
            trades = backup.journal.trades.len(),
            "importing backup"
        );
        self.journal = backup.journal;
        self.dirty.extend(Collection::ALL);
        Ok(())
    }

    // ── Reset & Dirty State ─────────────────────────────────────────

    /// Empty one collection (settings go back to defaults).
    pub fn reset_collection(&mut self, collection: Collection) {
        match collection {
            Collection::Habits => self.journal.habits.clear(),
            Collection::Trades => self.journal.trades.clear(),
            Collection::Goals => self.journal.goals.clear(),
            Collection::Budget => self.journal.budget_items.clear(),
            Collection::DailyReviews => self.journal.daily_reviews.clear(),
            Collection::MindsetLogs => self.journal.mindset_logs.clear(),
            Collection::Settings => self.journal.settings = Settings::default(),
        }
        self.dirty.insert(collection);
    }

    pub fn reset_all(&mut self) {
        for collection in Collection::ALL {
            self.reset_collection(collection);
        }
    }

    /// Returns `true` if anything changed since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        !self.dirty.is_empty()
    }

    #[must_use]
    pub fn dirty_collections(&self) -> Vec<Collection> {
        self.dirty.iter().copied().collect()
    }
}
