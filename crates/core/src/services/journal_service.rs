use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::CoreError;
use crate::models::budget::BudgetItem;
use crate::models::goal::{Goal, GoalStatus};
use crate::models::habit::Habit;
use crate::models::journal::Journal;
use crate::models::mindset::MindsetLog;
use crate::models::review::DailyReview;
use crate::models::settings::Settings;
use crate::models::trade::{Trade, TradeType};

/// Outcome filter of the trade search. A loss here is anything that is not
/// a win, so break-even trades show up under `Loss`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeFilter {
    Win,
    Loss,
}

/// Trade search as offered by the journal list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeQuery {
    /// Case-insensitive substring of the symbol or strategy
    pub text: Option<String>,
    pub trade_type: Option<TradeType>,
    pub outcome: Option<OutcomeFilter>,
}

impl TradeQuery {
    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = text.to_lowercase();
            let in_symbol = trade.symbol.to_lowercase().contains(&needle);
            let in_strategy = trade
                .strategy
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&needle));
            if !in_symbol && !in_strategy {
                return false;
            }
        }
        if self.trade_type.is_some_and(|kind| kind != trade.trade_type) {
            return false;
        }
        match self.outcome {
            Some(OutcomeFilter::Win) => trade.pnl() > 0.0,
            Some(OutcomeFilter::Loss) => trade.pnl() <= 0.0,
            None => true,
        }
    }
}

/// Whether `save_review` inserted a new review or replaced the one for that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewUpsert {
    Inserted,
    Replaced,
}

/// Validated mutations of the journal collections.
///
/// Pure business logic over an in-memory `Journal`; persistence is the
/// caller's concern. Lists are kept newest first, as the journal shows them.
pub struct JournalService;

impl JournalService {
    pub fn new() -> Self {
        Self
    }

    // ── Trades ──────────────────────────────────────────────────────

    pub fn add_trade(&self, journal: &mut Journal, trade: Trade) -> Result<(), CoreError> {
        self.validate_trade(&trade)?;
        if journal.trades.iter().any(|t| t.id == trade.id) {
            return Err(CoreError::ValidationError(format!(
                "Trade id {} already exists",
                trade.id
            )));
        }
        journal.trades.insert(0, trade);
        Ok(())
    }

    /// Replace a trade in place. The stored id and creation time are kept.
    pub fn update_trade(&self, journal: &mut Journal, trade: Trade) -> Result<(), CoreError> {
        self.validate_trade(&trade)?;
        let existing = journal
            .trades
            .iter_mut()
            .find(|t| t.id == trade.id)
            .ok_or_else(|| CoreError::not_found("Trade", &trade.id))?;
        let created_at = existing.created_at;
        *existing = Trade { created_at, ..trade };
        Ok(())
    }

    pub fn remove_trade(&self, journal: &mut Journal, id: &str) -> Result<Trade, CoreError> {
        let idx = journal
            .trades
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found("Trade", id))?;
        Ok(journal.trades.remove(idx))
    }

    /// Trades matching the query, newest first.
    pub fn search_trades<'a>(&self, journal: &'a Journal, query: &TradeQuery) -> Vec<&'a Trade> {
        let mut found: Vec<&Trade> = journal.trades.iter().filter(|t| query.matches(t)).collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    fn validate_trade(&self, trade: &Trade) -> Result<(), CoreError> {
        if trade.symbol.trim().is_empty() {
            return Err(CoreError::ValidationError("Trade symbol must not be empty".into()));
        }
        check_score("Discipline score", trade.discipline_score)?;
        for (field, value) in [
            ("Entry price", trade.entry_price),
            ("Exit price", trade.exit_price),
            ("Position size", trade.position_size),
        ] {
            if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
                return Err(CoreError::ValidationError(format!(
                    "{field} must be a non-negative number"
                )));
            }
        }
        if trade.profit_loss.is_some_and(|v| !v.is_finite()) {
            return Err(CoreError::ValidationError("P&L must be a finite number".into()));
        }
        Ok(())
    }

    // ── Daily reviews ───────────────────────────────────────────────

    /// Insert or replace the review for `review.review_date`.
    ///
    /// Replacing keeps the stored review's id, creation time and position.
    /// A new review goes to the front of the list.
    pub fn save_review(&self, journal: &mut Journal, review: DailyReview) -> Result<ReviewUpsert, CoreError> {
        for (field, value) in [
            ("Energy level", review.energy_level),
            ("Focus level", review.focus_level),
            ("Mood score", review.mood_score),
            ("Overall score", review.overall_score),
        ] {
            check_score(field, value)?;
        }

        match journal
            .daily_reviews
            .iter_mut()
            .find(|r| r.review_date == review.review_date)
        {
            Some(existing) => {
                let id = std::mem::take(&mut existing.id);
                let created_at = existing.created_at;
                *existing = DailyReview { id, created_at, ..review };
                Ok(ReviewUpsert::Replaced)
            }
            None => {
                journal.daily_reviews.insert(0, review);
                Ok(ReviewUpsert::Inserted)
            }
        }
    }

    pub fn review_for<'a>(&self, journal: &'a Journal, date: NaiveDate) -> Option<&'a DailyReview> {
        journal.daily_reviews.iter().find(|r| r.review_date == date)
    }

    pub fn remove_review(&self, journal: &mut Journal, id: &str) -> Result<DailyReview, CoreError> {
        let idx = journal
            .daily_reviews
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CoreError::not_found("Daily review", id))?;
        Ok(journal.daily_reviews.remove(idx))
    }

    // ── Habits ──────────────────────────────────────────────────────

    pub fn add_habit(&self, journal: &mut Journal, habit: Habit) -> Result<(), CoreError> {
        if habit.name.trim().is_empty() {
            return Err(CoreError::ValidationError("Habit name must not be empty".into()));
        }
        journal.habits.push(habit);
        Ok(())
    }

    /// Flip today's completion. Returns the new completion state.
    pub fn toggle_habit(&self, journal: &mut Journal, id: &str) -> Result<bool, CoreError> {
        let habit = journal
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::not_found("Habit", id))?;
        habit.toggle_completion();
        Ok(habit.is_completed_today())
    }

    /// Zero every streak counter and clear today's completions.
    pub fn reset_streaks(&self, journal: &mut Journal) {
        for habit in &mut journal.habits {
            habit.current_streak = Some(0);
            habit.longest_streak = Some(0);
            habit.completed_today = Some(false);
        }
    }

    pub fn remove_habit(&self, journal: &mut Journal, id: &str) -> Result<Habit, CoreError> {
        let idx = journal
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::not_found("Habit", id))?;
        Ok(journal.habits.remove(idx))
    }

    // ── Goals ───────────────────────────────────────────────────────

    pub fn add_goal(&self, journal: &mut Journal, goal: Goal) -> Result<(), CoreError> {
        if goal.title.trim().is_empty() {
            return Err(CoreError::ValidationError("Goal title must not be empty".into()));
        }
        if !(goal.target_value.is_finite() && goal.target_value > 0.0) {
            return Err(CoreError::ValidationError("Goal target must be greater than 0".into()));
        }
        journal.goals.push(goal);
        Ok(())
    }

    pub fn update_goal_progress(
        &self,
        journal: &mut Journal,
        id: &str,
        current_value: f64,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        if !current_value.is_finite() {
            return Err(CoreError::ValidationError("Goal progress must be a finite number".into()));
        }
        let goal = find_goal(journal, id)?;
        goal.current_value = current_value;
        goal.updated_at = now;
        Ok(())
    }

    pub fn set_goal_status(
        &self,
        journal: &mut Journal,
        id: &str,
        status: GoalStatus,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        let goal = find_goal(journal, id)?;
        goal.status = status;
        goal.updated_at = now;
        Ok(())
    }

    pub fn remove_goal(&self, journal: &mut Journal, id: &str) -> Result<Goal, CoreError> {
        let idx = journal
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| CoreError::not_found("Goal", id))?;
        Ok(journal.goals.remove(idx))
    }

    // ── Budget ──────────────────────────────────────────────────────

    pub fn add_budget_item(&self, journal: &mut Journal, item: BudgetItem) -> Result<(), CoreError> {
        if item.name.trim().is_empty() {
            return Err(CoreError::ValidationError("Budget item name must not be empty".into()));
        }
        if !(item.amount.is_finite() && item.amount > 0.0) {
            return Err(CoreError::ValidationError("Budget amount must be greater than 0".into()));
        }
        journal.budget_items.push(item);
        Ok(())
    }

    /// Flip the paid flag. Returns the new state.
    pub fn toggle_budget_paid(&self, journal: &mut Journal, id: &str) -> Result<bool, CoreError> {
        let item = journal
            .budget_items
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| CoreError::not_found("Budget item", id))?;
        item.is_paid = !item.is_paid;
        Ok(item.is_paid)
    }

    pub fn remove_budget_item(&self, journal: &mut Journal, id: &str) -> Result<BudgetItem, CoreError> {
        let idx = journal
            .budget_items
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| CoreError::not_found("Budget item", id))?;
        Ok(journal.budget_items.remove(idx))
    }

    // ── Mindset ─────────────────────────────────────────────────────

    pub fn add_mindset_log(&self, journal: &mut Journal, log: MindsetLog) -> Result<(), CoreError> {
        check_score("Intensity", log.intensity)?;
        journal.mindset_logs.insert(0, log);
        Ok(())
    }

    // ── Settings ────────────────────────────────────────────────────

    pub fn update_settings(&self, journal: &mut Journal, settings: Settings) -> Result<(), CoreError> {
        if settings.max_consecutive_losses == 0 {
            return Err(CoreError::ValidationError(
                "Max consecutive losses must be at least 1".into(),
            ));
        }
        if !(settings.max_daily_loss.is_finite() && settings.max_daily_loss >= 0.0) {
            return Err(CoreError::ValidationError(
                "Max daily loss must be a non-negative number".into(),
            ));
        }
        if settings.trading_rules.iter().any(|r| r.text.trim().is_empty()) {
            return Err(CoreError::ValidationError("Trading rules must have text".into()));
        }
        journal.settings = settings;
        Ok(())
    }
}

impl Default for JournalService {
    fn default() -> Self {
        Self::new()
    }
}

fn find_goal<'a>(journal: &'a mut Journal, id: &str) -> Result<&'a mut Goal, CoreError> {
    journal
        .goals
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or_else(|| CoreError::not_found("Goal", id))
}

/// 1 to 10 scale; `None` means not recorded.
fn check_score(field: &str, value: Option<u8>) -> Result<(), CoreError> {
    match value {
        Some(v) if !(1..=10).contains(&v) => Err(CoreError::ValidationError(format!(
            "{field} must be between 1 and 10, got {v}"
        ))),
        _ => Ok(()),
    }
}
