use chrono::{Duration, NaiveDate};
use std::borrow::Borrow;

use crate::models::analytics::{BudgetStats, GoalStats, HabitStats, ReviewStats};
use crate::models::budget::{BudgetItem, BudgetType};
use crate::models::goal::{Goal, GoalStatus};
use crate::models::habit::Habit;
use crate::models::review::DailyReview;
use crate::services::trade_stats_service::{mean, percent};

/// Entries kept in the review wins/improvements lists.
pub const TOP_REVIEW_ITEMS: usize = 5;

/// Days ahead an unpaid expense counts as upcoming.
pub const UPCOMING_PAYMENT_DAYS: i64 = 7;

/// Habit, goal, budget and review summaries.
pub struct ProgressService;

impl ProgressService {
    pub fn new() -> Self {
        Self
    }

    pub fn habit_stats(&self, habits: &[Habit]) -> HabitStats {
        let active: Vec<&Habit> = habits.iter().filter(|h| h.is_active).collect();
        let completed_today = active.iter().filter(|h| h.is_completed_today()).count();
        let streak_sum: u32 = active.iter().map(|h| h.current_streak()).sum();

        HabitStats {
            total_active: active.len(),
            completed_today,
            completion_rate: percent(completed_today, active.len()),
            avg_streak: mean(f64::from(streak_sum), active.len()),
            best_current_streak: habits.iter().map(Habit::current_streak).max().unwrap_or(0),
            max_streak: habits.iter().map(Habit::longest_streak).max().unwrap_or(0),
        }
    }

    /// Active goals' mean progress; zero-target goals contribute 0.
    pub fn goal_stats(&self, goals: &[Goal]) -> GoalStats {
        let active: Vec<&Goal> = goals.iter().filter(|g| g.status == GoalStatus::Active).collect();
        let progress_sum: f64 = active.iter().map(|g| g.progress_pct()).sum();

        GoalStats {
            active: active.len(),
            completed: goals.iter().filter(|g| g.status == GoalStatus::Completed).count(),
            avg_progress: mean(progress_sum, active.len()),
        }
    }

    /// Income, expenses, net cash flow and unpaid expenses due within a week of `today`.
    pub fn budget_stats(&self, items: &[BudgetItem], today: NaiveDate) -> BudgetStats {
        let sum_of = |kind: BudgetType| -> f64 {
            items
                .iter()
                .filter(|b| b.budget_type == kind)
                .map(|b| b.amount)
                .sum()
        };
        let total_income = sum_of(BudgetType::Income);
        let total_expenses = sum_of(BudgetType::Expense);

        let horizon = today + Duration::days(UPCOMING_PAYMENT_DAYS);
        let upcoming_payments = items
            .iter()
            .filter(|b| b.budget_type == BudgetType::Expense && !b.is_paid)
            .filter(|b| b.due_date.is_some_and(|due| due <= horizon))
            .cloned()
            .collect();

        BudgetStats {
            total_income,
            total_expenses,
            net_cash_flow: total_income - total_expenses,
            upcoming_payments,
        }
    }

    /// Averages default blank scores to 5. Wins and improvements are
    /// flattened in review order and cut to the first five.
    pub fn review_stats<R: Borrow<DailyReview>>(&self, reviews: &[R]) -> ReviewStats {
        let count = reviews.len();
        let reviews = reviews.iter().map(Borrow::borrow);

        let (mut mood, mut energy, mut overall) = (0.0, 0.0, 0.0);
        let mut top_wins = Vec::new();
        let mut top_improvements = Vec::new();
        for review in reviews {
            mood += review.mood();
            energy += review.energy();
            overall += review.overall();
            top_wins.extend(review.wins.iter().cloned());
            top_improvements.extend(review.improvements.iter().cloned());
        }
        top_wins.truncate(TOP_REVIEW_ITEMS);
        top_improvements.truncate(TOP_REVIEW_ITEMS);

        ReviewStats {
            reviews_completed: count,
            avg_mood: mean(mood, count),
            avg_energy: mean(energy, count),
            avg_overall: mean(overall, count),
            top_wins,
            top_improvements,
        }
    }

    /// Composite score: habits 30%, win rate 25%, discipline 25%, goals 20%.
    ///
    /// Discipline is on a 1 to 10 scale and is scaled to a percentage first.
    pub fn identity_score(
        &self,
        habit_completion_rate: f64,
        win_rate: f64,
        avg_discipline: f64,
        goals_progress: f64,
    ) -> u32 {
        let score = habit_completion_rate * 0.3
            + win_rate * 0.25
            + avg_discipline / 10.0 * 100.0 * 0.25
            + goals_progress * 0.2;
        if score.is_finite() && score > 0.0 {
            score.round() as u32
        } else {
            0
        }
    }
}

impl Default for ProgressService {
    fn default() -> Self {
        Self::new()
    }
}
