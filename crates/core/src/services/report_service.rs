use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::errors::CoreError;
use crate::models::analytics::{AnalyticsOverview, DashboardSummary};
use crate::models::journal::Journal;
use crate::models::report::{HabitReport, PeriodReport, TradingReport};
use crate::models::window::{ReportPeriod, TimeRange};
use crate::services::correlation_service::CorrelationService;
use crate::services::insight_service::{InsightContext, InsightService, ReviewCoverage};
use crate::services::progress_service::ProgressService;
use crate::services::risk_service::RiskService;
use crate::services::timing_service::TimingService;
use crate::services::trade_stats_service::TradeStatsService;
use crate::services::window_service::WindowService;

/// Assembles the composite views: the analytics overview for a rolling
/// range, the weekly/monthly period report, and the dashboard headline.
///
/// Works on a read-only `Journal` snapshot; nothing here mutates state.
pub struct ReportService {
    windows: WindowService,
    trade_stats: TradeStatsService,
    risk: RiskService,
    timing: TimingService,
    correlation: CorrelationService,
    progress: ProgressService,
    insights: InsightService,
}

impl ReportService {
    pub fn new() -> Self {
        Self {
            windows: WindowService::new(),
            trade_stats: TradeStatsService::new(),
            risk: RiskService::new(),
            timing: TimingService::new(),
            correlation: CorrelationService::new(),
            progress: ProgressService::new(),
            insights: InsightService::new(),
        }
    }

    /// Every analytics statistic for one rolling range ending at `now`.
    ///
    /// The weekly series always covers the last seven days of the whole
    /// journal, independent of the range.
    pub fn analytics_overview(
        &self,
        journal: &Journal,
        range: TimeRange,
        now: DateTime<FixedOffset>,
    ) -> Result<AnalyticsOverview, CoreError> {
        let window = self.windows.resolve_range(range, now)?;
        let trades = self.windows.filter_trades(&journal.trades, &window);
        let offset = now.offset();
        tracing::debug!(%range, trades = trades.len(), "building analytics overview");

        let summary = self.trade_stats.summarize(&trades);
        let pnl = self.trade_stats.pnl_summary(&trades);
        let loss_streaks = self.risk.loss_streaks(&trades);
        let emotions = self.trade_stats.emotion_stats(&trades);
        let habits = self.progress.habit_stats(&journal.habits);

        let insights = self.insights.generate(&InsightContext {
            summary: &summary,
            pnl: &pnl,
            loss_streaks: &loss_streaks,
            emotions: &emotions,
            habits: &habits,
            review_coverage: None,
        });

        Ok(AnalyticsOverview {
            range,
            window,
            time_of_day: self.timing.time_of_day(&trades, offset),
            drawdown: self.risk.drawdown(&trades),
            monthly_pnl: self.timing.monthly_pnl(&trades, offset),
            weekly_pnl: self.timing.weekly_pnl(&journal.trades, now),
            habit_correlation: self.correlation.habit_trade_correlation(
                &trades,
                &journal.daily_reviews,
                offset,
            ),
            strategy_stats: self.trade_stats.strategy_breakdown(&trades),
            goals: self.progress.goal_stats(&journal.goals),
            summary,
            pnl,
            loss_streaks,
            emotions,
            habits,
            insights,
        })
    }

    /// Weekly or monthly report for the calendar period `offset` periods
    /// back from the current one.
    pub fn period_report(
        &self,
        journal: &Journal,
        period: ReportPeriod,
        offset: i32,
        now: DateTime<FixedOffset>,
    ) -> Result<PeriodReport, CoreError> {
        let window = self.windows.resolve_report_window(period, offset, now)?;
        let trades = self.windows.filter_trades(&journal.trades, &window);
        let reviews = self.windows.filter_reviews(&journal.daily_reviews, &window);
        tracing::debug!(
            %period,
            offset,
            trades = trades.len(),
            reviews = reviews.len(),
            "building period report"
        );

        let summary = self.trade_stats.summarize(&trades);
        let pnl = self.trade_stats.pnl_summary(&trades);
        let loss_streaks = self.risk.loss_streaks(&trades);
        let emotions = self.trade_stats.emotion_stats(&trades);
        let habits = self.progress.habit_stats(&journal.habits);
        let review_stats = self.progress.review_stats(&reviews);
        let (best_trade, worst_trade) = self.trade_stats.best_and_worst(&trades);

        let insights = self
            .insights
            .generate(&InsightContext {
                summary: &summary,
                pnl: &pnl,
                loss_streaks: &loss_streaks,
                emotions: &emotions,
                habits: &habits,
                review_coverage: Some(ReviewCoverage {
                    completed: review_stats.reviews_completed,
                    floor: period.review_floor(),
                }),
            })
            .into_iter()
            .map(|insight| insight.text)
            .collect();

        Ok(PeriodReport {
            period,
            date_range: window,
            trading: TradingReport {
                total_trades: summary.total_trades,
                wins: summary.wins,
                losses: summary.losses,
                win_rate: summary.win_rate,
                total_pnl: summary.total_pnl,
                avg_discipline: summary.avg_discipline,
                followed_plan_rate: summary.followed_plan_rate,
                best_trade,
                worst_trade,
                strategy_stats: self.trade_stats.strategy_breakdown(&trades),
                emotion_stats: self.trade_stats.emotion_tallies(&trades),
            },
            habits: HabitReport {
                total_active: habits.total_active,
                avg_streak: habits.avg_streak,
                max_streak: habits.max_streak,
            },
            reviews: review_stats,
            insights,
            generated_at: now,
        })
    }

    /// Headline numbers over every trade in the journal.
    pub fn dashboard(&self, journal: &Journal, now: DateTime<FixedOffset>) -> DashboardSummary {
        let summary = self.trade_stats.summarize(&journal.trades);
        let habits = self.progress.habit_stats(&journal.habits);
        let goals = self.progress.goal_stats(&journal.goals);

        let week_ago = (now - Duration::days(7)).with_timezone(&Utc);
        let (weekly_pnl, weekly_trades) = journal
            .trades
            .iter()
            .filter(|t| t.created_at >= week_ago)
            .fold((0.0, 0usize), |(pnl, count), t| (pnl + t.pnl(), count + 1));

        DashboardSummary {
            total_trades: summary.total_trades,
            win_rate: summary.win_rate,
            total_pnl: summary.total_pnl,
            weekly_pnl,
            weekly_trades,
            avg_discipline_score: summary.avg_discipline,
            current_habit_streak: habits.best_current_streak,
            longest_habit_streak: habits.max_streak,
            habits_completed_today: habits.completed_today,
            total_habits: habits.total_active,
            goals_progress: goals.avg_progress,
            identity_score: self.progress.identity_score(
                habits.completion_rate,
                summary.win_rate,
                summary.avg_discipline,
                goals.avg_progress,
            ),
        }
    }

    /// Pretty-printed JSON document for a period report.
    pub fn export_report_json(&self, report: &PeriodReport) -> Result<String, CoreError> {
        serde_json::to_string_pretty(report).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    pub fn parse_report_json(&self, json: &str) -> Result<PeriodReport, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
