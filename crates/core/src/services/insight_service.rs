use crate::models::analytics::{EmotionStats, HabitStats, LossStreakStats, PnlSummary, TradeSummary};
use crate::models::insight::Insight;
use crate::services::trade_stats_service::MIN_EMOTION_SAMPLES;

/// Aggregator outputs the insight rules look at.
#[derive(Debug, Clone, Copy)]
pub struct InsightContext<'a> {
    pub summary: &'a TradeSummary,
    pub pnl: &'a PnlSummary,
    pub loss_streaks: &'a LossStreakStats,
    pub emotions: &'a EmotionStats,
    pub habits: &'a HabitStats,
    /// Reviews written in the period and the expected minimum.
    /// `None` disables the review rule (rolling ranges have no floor).
    pub review_coverage: Option<ReviewCoverage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewCoverage {
    pub completed: usize,
    pub floor: usize,
}

/// Turns statistics into advisory messages.
///
/// Rules are evaluated in a fixed order, which is also the display order.
/// Any number of rules can fire at once.
pub struct InsightService;

impl InsightService {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        let summary = ctx.summary;
        let mut insights = Vec::new();

        if summary.win_rate >= 60.0 {
            insights.push(Insight::success(format!(
                "Excellent win rate of {:.0}%! Keep up the great work.",
                fixed(summary.win_rate, 0)
            )));
        } else if summary.win_rate < 40.0 && summary.total_trades >= 5 {
            insights.push(Insight::warning(format!(
                "Win rate of {:.0}% needs improvement. Review your entry criteria.",
                fixed(summary.win_rate, 0)
            )));
        }

        if summary.avg_discipline >= 8.0 {
            insights.push(Insight::success(format!(
                "Strong discipline score of {:.1}/10. Your trading plan is working.",
                fixed(summary.avg_discipline, 1)
            )));
        } else if summary.avg_discipline < 6.0 && summary.total_trades >= 3 {
            insights.push(Insight::warning(format!(
                "Discipline score of {:.1}/10 is below target. Use the pre-trade checklist.",
                fixed(summary.avg_discipline, 1)
            )));
        }

        if summary.followed_plan_rate < 70.0 && summary.total_trades >= 5 {
            insights.push(Insight::warning(format!(
                "Only {:.0}% of trades followed your plan. Stick to your rules.",
                fixed(summary.followed_plan_rate, 0)
            )));
        }

        if ctx.habits.avg_streak >= 7.0 {
            insights.push(Insight::success(format!(
                "Average habit streak of {:.0} days shows great consistency.",
                fixed(ctx.habits.avg_streak, 0)
            )));
        }

        if let Some(coverage) = ctx.review_coverage {
            if coverage.completed < coverage.floor {
                insights.push(Insight::info(
                    "Complete more daily reviews to track your progress and mindset.",
                ));
            }
        }

        if let Some(best) = &ctx.emotions.best_emotion {
            if best.count >= MIN_EMOTION_SAMPLES {
                insights.push(Insight::info(format!(
                    "You trade best when feeling \"{}\" ({:.0}% win rate).",
                    best.emotion,
                    fixed(best.win_rate, 0)
                )));
            }
        }

        if ctx.loss_streaks.max_consecutive_losses >= 3 {
            insights.push(Insight::warning(format!(
                "You've had {} consecutive losses. Consider stopping after 2-3 losses.",
                ctx.loss_streaks.max_consecutive_losses
            )));
        }

        if ctx.pnl.risk_reward >= 1.5 {
            insights.push(Insight::success(format!(
                "Your R:R of {:.2} is excellent. Keep letting winners run!",
                fixed(ctx.pnl.risk_reward, 2)
            )));
        }

        if ctx.habits.completion_rate >= 80.0 {
            insights.push(Insight::success(format!(
                "{:.0}% habit completion rate today. You're building strong discipline!",
                fixed(ctx.habits.completion_rate, 0)
            )));
        }

        if summary.total_trades == 0 {
            insights.push(Insight::info(
                "Begin tracking your trades to unlock powerful analytics and insights.",
            ));
        }

        tracing::debug!(count = insights.len(), "generated insights");
        insights
    }
}

/// Round half away from zero at `digits` decimals.
fn fixed(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

impl Default for InsightService {
    fn default() -> Self {
        Self::new()
    }
}
