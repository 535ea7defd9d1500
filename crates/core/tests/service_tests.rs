// ═══════════════════════════════════════════════════════════════════
// Service Tests — WindowService, TradeStatsService, RiskService,
// TimingService, CorrelationService, ProgressService, InsightService,
// ReportService, ExportService
// ═══════════════════════════════════════════════════════════════════

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use trader_journal_core::errors::CoreError;
use trader_journal_core::models::analytics::{
    EmotionStats, HabitStats, LossStreakStats, PnlSummary, TradeSummary, TradingSession,
};
use trader_journal_core::models::budget::{BudgetItem, BudgetType};
use trader_journal_core::models::goal::{Goal, GoalCategory, GoalStatus};
use trader_journal_core::models::habit::{Habit, HabitCategory};
use trader_journal_core::models::insight::InsightKind;
use trader_journal_core::models::journal::Journal;
use trader_journal_core::models::review::DailyReview;
use trader_journal_core::models::settings::Settings;
use trader_journal_core::models::trade::{Trade, TradeType};
use trader_journal_core::models::window::{ReportPeriod, TimeRange};
use trader_journal_core::services::correlation_service::CorrelationService;
use trader_journal_core::services::export_service::ExportService;
use trader_journal_core::services::insight_service::{InsightContext, InsightService, ReviewCoverage};
use trader_journal_core::services::progress_service::ProgressService;
use trader_journal_core::services::report_service::ReportService;
use trader_journal_core::services::risk_service::RiskService;
use trader_journal_core::services::timing_service::TimingService;
use trader_journal_core::services::trade_stats_service::TradeStatsService;
use trader_journal_core::services::window_service::WindowService;

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

fn tz(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap()
}

/// Friday 2024-03-15 12:00 UTC.
fn now() -> DateTime<FixedOffset> {
    tz(0).with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn trade(pnl: f64, created_at: DateTime<Utc>) -> Trade {
    Trade::new("ES", TradeType::Long, created_at).with_pnl(pnl)
}

/// One trade per day starting 2024-01-01 10:00 UTC, in the given order.
fn sequence(pnls: &[f64]) -> Vec<Trade> {
    pnls.iter()
        .enumerate()
        .map(|(i, &pnl)| trade(pnl, at(2024, 1, 1, 10) + Duration::days(i as i64)))
        .collect()
}

fn with_emotion(mut t: Trade, emotion: &str) -> Trade {
    t.pre_trade_emotion = Some(emotion.to_string());
    t
}

fn with_entry_hour(mut t: Trade, hour: u32) -> Trade {
    t.entry_date = Some(d(2024, 1, 1).and_hms_opt(hour, 15, 0).unwrap().into());
    t
}

fn review(date: NaiveDate, overall: Option<u8>) -> DailyReview {
    let mut r = DailyReview::new(date, at(2024, 1, 1, 20));
    r.overall_score = overall;
    r
}

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ═══════════════════════════════════════════════════════════════════
// WindowService
// ═══════════════════════════════════════════════════════════════════

mod window_service {
    use super::*;

    #[test]
    fn week_range_is_seven_days_back() {
        let w = WindowService::new().resolve_range(TimeRange::Week, now()).unwrap();
        assert_eq!(w.start, tz(0).with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap());
        assert_eq!(w.end, now());
    }

    #[test]
    fn month_and_year_ranges_are_calendar_based() {
        let svc = WindowService::new();
        let month = svc.resolve_range(TimeRange::Month, now()).unwrap();
        assert_eq!(month.start, tz(0).with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap());
        let year = svc.resolve_range(TimeRange::Year, now()).unwrap();
        assert_eq!(year.start, tz(0).with_ymd_and_hms(2023, 3, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn month_range_clamps_to_month_end() {
        let end_of_march = tz(0).with_ymd_and_hms(2024, 3, 31, 9, 0, 0).unwrap();
        let w = WindowService::new().resolve_range(TimeRange::Month, end_of_march).unwrap();
        assert_eq!(w.start.date_naive(), d(2024, 2, 29));
    }

    #[test]
    fn all_range_starts_at_epoch() {
        let w = WindowService::new().resolve_range(TimeRange::All, now()).unwrap();
        assert_eq!(w.start.timestamp(), 0);
    }

    #[test]
    fn report_week_runs_sunday_to_saturday() {
        let w = WindowService::new()
            .resolve_report_window(ReportPeriod::Week, 0, now())
            .unwrap();
        assert_eq!(w.start, tz(0).with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());
        assert_eq!(
            w.end,
            tz(0).with_ymd_and_hms(2024, 3, 16, 23, 59, 59).unwrap() + Duration::milliseconds(999)
        );
    }

    #[test]
    fn report_week_on_a_sunday_starts_that_day() {
        let sunday = tz(0).with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        let w = WindowService::new()
            .resolve_report_window(ReportPeriod::Week, 0, sunday)
            .unwrap();
        assert_eq!(w.start.date_naive(), d(2024, 3, 10));
        assert_eq!(w.end.date_naive(), d(2024, 3, 16));
    }

    #[test]
    fn report_week_offset_goes_back() {
        let w = WindowService::new()
            .resolve_report_window(ReportPeriod::Week, -1, now())
            .unwrap();
        assert_eq!(w.start.date_naive(), d(2024, 3, 3));
        assert_eq!(w.end.date_naive(), d(2024, 3, 9));
    }

    #[test]
    fn positive_offset_is_clamped_to_current_period() {
        let svc = WindowService::new();
        let current = svc.resolve_report_window(ReportPeriod::Week, 0, now()).unwrap();
        let future = svc.resolve_report_window(ReportPeriod::Week, 3, now()).unwrap();
        assert_eq!(current, future);
    }

    #[test]
    fn report_month_covers_whole_month() {
        let svc = WindowService::new();
        let march = svc.resolve_report_window(ReportPeriod::Month, 0, now()).unwrap();
        assert_eq!(march.start, tz(0).with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(march.end.date_naive(), d(2024, 3, 31));

        let feb = svc.resolve_report_window(ReportPeriod::Month, -1, now()).unwrap();
        assert_eq!(feb.start.date_naive(), d(2024, 2, 1));
        assert_eq!(feb.end.date_naive(), d(2024, 2, 29));

        let dec = svc.resolve_report_window(ReportPeriod::Month, -3, now()).unwrap();
        assert_eq!(dec.start.date_naive(), d(2023, 12, 1));
        assert_eq!(dec.end.date_naive(), d(2023, 12, 31));
    }

    #[test]
    fn report_window_uses_local_offset() {
        let tokyo_now = tz(9).with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let w = WindowService::new()
            .resolve_report_window(ReportPeriod::Week, 0, tokyo_now)
            .unwrap();
        assert_eq!(*w.start.offset(), tz(9));
        // Sunday midnight in Tokyo is Saturday 15:00 UTC
        assert_eq!(w.start.with_timezone(&Utc), at(2024, 3, 9, 15));
    }

    #[test]
    fn filter_trades_is_inclusive_and_keeps_order() {
        let svc = WindowService::new();
        let w = svc.resolve_report_window(ReportPeriod::Week, 0, now()).unwrap();
        let trades = vec![
            trade(1.0, at(2024, 3, 12, 9)),
            trade(2.0, at(2024, 3, 9, 23)),
            trade(3.0, at(2024, 3, 10, 0)),
            trade(4.0, at(2024, 3, 17, 0)),
        ];
        let inside = svc.filter_trades(&trades, &w);
        let pnls: Vec<f64> = inside.iter().map(|t| t.pnl()).collect();
        assert_eq!(pnls, vec![1.0, 3.0]);
    }

    #[test]
    fn filter_reviews_by_calendar_date() {
        let svc = WindowService::new();
        let w = svc.resolve_report_window(ReportPeriod::Week, 0, now()).unwrap();
        let reviews = vec![
            review(d(2024, 3, 9), None),
            review(d(2024, 3, 10), None),
            review(d(2024, 3, 16), None),
            review(d(2024, 3, 17), None),
        ];
        let inside = svc.filter_reviews(&reviews, &w);
        let dates: Vec<NaiveDate> = inside.iter().map(|r| r.review_date).collect();
        assert_eq!(dates, vec![d(2024, 3, 10), d(2024, 3, 16)]);
    }

    #[test]
    fn empty_input_filters_to_empty() {
        let svc = WindowService::new();
        let w = svc.resolve_range(TimeRange::All, now()).unwrap();
        let none: Vec<Trade> = Vec::new();
        assert!(svc.filter_trades(&none, &w).is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// TradeStatsService
// ═══════════════════════════════════════════════════════════════════

mod trade_stats {
    use super::*;

    #[test]
    fn four_trade_scenario() {
        let trades = sequence(&[100.0, -50.0, -30.0, 200.0]);
        let s = TradeStatsService::new().summarize(&trades);
        assert_eq!(s.total_trades, 4);
        assert_eq!(s.wins, 2);
        assert_eq!(s.losses, 2);
        approx(s.win_rate, 50.0);
        approx(s.total_pnl, 220.0);
    }

    #[test]
    fn empty_input_is_zeroed() {
        let none: Vec<Trade> = Vec::new();
        let svc = TradeStatsService::new();
        assert_eq!(svc.summarize(&none), TradeSummary::default());
        assert_eq!(svc.pnl_summary(&none), PnlSummary::default());
        assert_eq!(svc.emotion_stats(&none), EmotionStats::default());
        assert!(svc.strategy_breakdown(&none).is_empty());
        assert_eq!(svc.best_and_worst(&none), (None, None));
    }

    #[test]
    fn breakeven_counts_toward_total_only() {
        let trades = sequence(&[10.0, 0.0, -10.0, 0.0]);
        let s = TradeStatsService::new().summarize(&trades);
        assert_eq!((s.wins, s.losses, s.total_trades), (1, 1, 4));
        approx(s.win_rate, 25.0);
    }

    #[test]
    fn discipline_average_defaults_blank_scores() {
        let mut trades = sequence(&[1.0, 1.0]);
        trades[0].discipline_score = Some(8);
        let s = TradeStatsService::new().summarize(&trades);
        approx(s.avg_discipline, 6.5);
    }

    #[test]
    fn followed_plan_rate() {
        let mut trades = sequence(&[1.0, 1.0, 1.0, 1.0]);
        trades[0].followed_plan = true;
        trades[3].followed_plan = true;
        let s = TradeStatsService::new().summarize(&trades);
        approx(s.followed_plan_rate, 50.0);
    }

    #[test]
    fn pnl_summary_and_risk_reward() {
        let trades = sequence(&[100.0, -50.0, -30.0, 200.0]);
        let p = TradeStatsService::new().pnl_summary(&trades);
        approx(p.total_pnl, 220.0);
        approx(p.avg_win, 150.0);
        approx(p.avg_loss, 40.0);
        approx(p.risk_reward, 3.75);
    }

    #[test]
    fn risk_reward_without_losses_is_zero() {
        let trades = sequence(&[100.0, 50.0]);
        let p = TradeStatsService::new().pnl_summary(&trades);
        approx(p.avg_loss, 0.0);
        approx(p.risk_reward, 0.0);
    }

    #[test]
    fn best_and_worst_trade() {
        let trades = sequence(&[20.0, -75.0, 300.0, 0.0]);
        let (best, worst) = TradeStatsService::new().best_and_worst(&trades);
        assert_eq!(best.unwrap().pnl(), 300.0);
        assert_eq!(worst.unwrap().pnl(), -75.0);
    }

    #[test]
    fn single_trade_is_both_best_and_worst() {
        let trades = sequence(&[-5.0]);
        let (best, worst) = TradeStatsService::new().best_and_worst(&trades);
        assert_eq!(best, worst);
        assert_eq!(best.unwrap().id, trades[0].id);
    }

    #[test]
    fn strategy_breakdown_defaults_to_unknown() {
        let mut trades = sequence(&[100.0, -40.0, 0.0, 25.0]);
        trades[0].strategy = Some("Breakout".into());
        trades[1].strategy = Some("Breakout".into());
        trades[2].strategy = Some("Breakout".into());
        let stats = TradeStatsService::new().strategy_breakdown(&trades);
        let breakout = &stats["Breakout"];
        assert_eq!((breakout.wins, breakout.losses), (1, 1));
        approx(breakout.pnl, 60.0);
        let unknown = &stats["Unknown"];
        assert_eq!((unknown.wins, unknown.losses), (1, 0));
    }

    #[test]
    fn emotion_stats_pick_best_and_worst_from_sampled_groups() {
        let base = sequence(&[10.0, 20.0, -5.0, -10.0, -10.0, 0.0, 50.0]);
        let labels = ["Calm", "Calm", "Calm", "Fearful", "Fearful", "Fearful", "Greedy"];
        let trades: Vec<Trade> = base
            .into_iter()
            .zip(labels)
            .map(|(t, e)| with_emotion(t, e))
            .collect();

        let stats = TradeStatsService::new().emotion_stats(&trades);
        let order: Vec<&str> = stats.stats.iter().map(|s| s.emotion.as_str()).collect();
        assert_eq!(order, vec!["Greedy", "Calm", "Fearful"]);

        let best = stats.best_emotion.unwrap();
        assert_eq!(best.emotion, "Calm");
        assert_eq!(best.count, 3);
        approx(best.win_rate, 200.0 / 3.0);
        approx(best.avg_pnl, 25.0 / 3.0);

        assert_eq!(stats.worst_emotion.unwrap().emotion, "Fearful");
    }

    #[test]
    fn best_emotion_falls_back_to_top_group() {
        let trades = vec![
            with_emotion(trade(-1.0, at(2024, 1, 1, 9)), "Anxious"),
            with_emotion(trade(5.0, at(2024, 1, 2, 9)), "Focused"),
        ];
        let stats = TradeStatsService::new().emotion_stats(&trades);
        assert_eq!(stats.best_emotion.unwrap().emotion, "Focused");
        assert!(stats.worst_emotion.is_none());
    }

    #[test]
    fn equal_win_rates_keep_first_appearance_order() {
        let trades = vec![
            with_emotion(trade(1.0, at(2024, 1, 1, 9)), "Bored"),
            trade(1.0, at(2024, 1, 2, 9)),
            with_emotion(trade(1.0, at(2024, 1, 3, 9)), "Calm"),
        ];
        let stats = TradeStatsService::new().emotion_stats(&trades);
        let order: Vec<&str> = stats.stats.iter().map(|s| s.emotion.as_str()).collect();
        assert_eq!(order, vec!["Bored", "Unknown", "Calm"]);
    }

    #[test]
    fn emotion_stats_carry_average_discipline() {
        let mut a = with_emotion(trade(1.0, at(2024, 1, 1, 9)), "Calm");
        a.discipline_score = Some(9);
        let b = with_emotion(trade(1.0, at(2024, 1, 2, 9)), "Calm");
        let stats = TradeStatsService::new().emotion_stats(&[a, b]);
        approx(stats.stats[0].avg_discipline, 7.0);
    }

    #[test]
    fn emotion_tallies_by_label() {
        let trades = vec![
            with_emotion(trade(10.0, at(2024, 1, 1, 9)), "Calm"),
            with_emotion(trade(-4.0, at(2024, 1, 2, 9)), "Calm"),
            trade(3.0, at(2024, 1, 3, 9)),
        ];
        let tallies = TradeStatsService::new().emotion_tallies(&trades);
        assert_eq!(tallies["Calm"].count, 2);
        assert_eq!(tallies["Calm"].wins, 1);
        approx(tallies["Calm"].pnl, 6.0);
        assert_eq!(tallies["Unknown"].count, 1);
    }

    #[test]
    fn accepts_borrowed_trades() {
        let trades = sequence(&[5.0, -5.0]);
        let refs: Vec<&Trade> = trades.iter().collect();
        assert_eq!(
            TradeStatsService::new().summarize(&refs),
            TradeStatsService::new().summarize(&trades)
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// RiskService
// ═══════════════════════════════════════════════════════════════════

mod risk {
    use super::*;

    #[test]
    fn four_trade_scenario_streaks() {
        let trades = sequence(&[100.0, -50.0, -30.0, 200.0]);
        let s = RiskService::new().loss_streaks(&trades);
        assert_eq!(s.max_consecutive_losses, 2);
        assert_eq!(s.current_losing_streak, 0);
        approx(s.avg_loss_streak, 2.0);
    }

    #[test]
    fn ninth_of_last_ten_breaks_current_streak() {
        let mut pnls = [-10.0; 10];
        pnls[8] = 5.0;
        let trades = sequence(&pnls);
        let s = RiskService::new().loss_streaks(&trades);
        assert_eq!(s.current_losing_streak, 1);
        assert_eq!(s.max_consecutive_losses, 8);
    }

    #[test]
    fn current_streak_only_looks_at_last_ten() {
        let trades = sequence(&[-1.0; 12]);
        let s = RiskService::new().loss_streaks(&trades);
        assert_eq!(s.current_losing_streak, 10);
        assert_eq!(s.max_consecutive_losses, 12);
    }

    #[test]
    fn open_streak_at_end_counts_as_completed() {
        let trades = sequence(&[-1.0, -1.0, 5.0, -1.0]);
        let s = RiskService::new().loss_streaks(&trades);
        assert_eq!(s.max_consecutive_losses, 2);
        assert_eq!(s.current_losing_streak, 1);
        approx(s.avg_loss_streak, 1.5);
    }

    #[test]
    fn breakeven_resets_the_streak() {
        let trades = sequence(&[-1.0, 0.0, -1.0]);
        let s = RiskService::new().loss_streaks(&trades);
        assert_eq!(s.max_consecutive_losses, 1);
    }

    #[test]
    fn streaks_use_chronological_order() {
        let mut trades = sequence(&[-1.0, -1.0, 10.0]);
        trades.reverse();
        let s = RiskService::new().loss_streaks(&trades);
        assert_eq!(s.current_losing_streak, 0);
        assert_eq!(s.max_consecutive_losses, 2);
    }

    #[test]
    fn empty_streaks_are_zeroed() {
        let none: Vec<Trade> = Vec::new();
        assert_eq!(RiskService::new().loss_streaks(&none), LossStreakStats::default());
    }

    #[test]
    fn drawdown_recovers_to_new_peak() {
        let trades = sequence(&[100.0, -50.0, -30.0, 200.0]);
        let dd = RiskService::new().drawdown(&trades);
        approx(dd.max_drawdown, 80.0);
        approx(dd.current_drawdown, 0.0);
        approx(dd.peak, 220.0);
        approx(dd.recovery_needed, 0.0);
    }

    #[test]
    fn drawdown_still_open() {
        let trades = sequence(&[100.0, -40.0]);
        let dd = RiskService::new().drawdown(&trades);
        approx(dd.current_drawdown, 40.0);
        approx(dd.max_drawdown, 40.0);
        approx(dd.recovery_needed, 40.0 / 60.01 * 100.0);
    }

    #[test]
    fn max_drawdown_never_below_current() {
        let trades = sequence(&[50.0, -80.0, 20.0, -10.0, 5.0]);
        let dd = RiskService::new().drawdown(&trades);
        assert!(dd.max_drawdown >= 0.0);
        assert!(dd.max_drawdown >= dd.current_drawdown);
        approx(dd.max_drawdown, 80.0);
        approx(dd.current_drawdown, 65.0);
    }

    #[test]
    fn empty_drawdown_is_zeroed() {
        let none: Vec<Trade> = Vec::new();
        let dd = RiskService::new().drawdown(&none);
        approx(dd.max_drawdown, 0.0);
        approx(dd.recovery_needed, 0.0);
    }

    #[test]
    fn consecutive_loss_limit() {
        let trades = vec![
            trade(50.0, at(2024, 3, 11, 9)),
            trade(-10.0, at(2024, 3, 12, 9)),
            trade(-20.0, at(2024, 3, 13, 9)),
            trade(-30.0, at(2024, 3, 14, 9)),
        ];
        let alerts = RiskService::new().risk_alerts(&trades, &Settings::default(), now());
        assert_eq!(alerts.consecutive_losses, 3);
        assert_eq!(alerts.max_consecutive_losses, 3);
        assert!(alerts.consecutive_loss_limit_reached);
        assert!(!alerts.daily_loss_limit_reached);
    }

    #[test]
    fn daily_loss_limit_uses_local_today() {
        // 2024-03-15 12:00 at +10:00 is 02:00 UTC; 20:00 UTC the day before is already "today"
        let sydney_now = tz(10).with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let trades = vec![
            trade(-450.0, at(2024, 3, 14, 20)),
            trade(-100.0, at(2024, 3, 15, 1)),
            trade(-900.0, at(2024, 3, 14, 12)),
            trade(30.0, at(2024, 3, 15, 1) + Duration::minutes(30)),
        ];
        let alerts = RiskService::new().risk_alerts(&trades, &Settings::default(), sydney_now);
        approx(alerts.today_pnl, -520.0);
        assert!(alerts.daily_loss_limit_reached);
        assert_eq!(alerts.consecutive_losses, 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// TimingService
// ═══════════════════════════════════════════════════════════════════

mod timing {
    use super::*;

    #[test]
    fn buckets_by_entry_hour() {
        let trades = vec![
            with_entry_hour(trade(10.0, at(2024, 1, 1, 22)), 9),
            with_entry_hour(trade(20.0, at(2024, 1, 2, 22)), 10),
            with_entry_hour(trade(-5.0, at(2024, 1, 3, 22)), 11),
            with_entry_hour(trade(1.0, at(2024, 1, 4, 22)), 13),
        ];
        let stats = TimingService::new().time_of_day(&trades, &tz(0));
        assert_eq!(stats.buckets.len(), 5);
        let morning = &stats.buckets[1];
        assert_eq!(morning.session, TradingSession::Morning);
        assert_eq!((morning.count, morning.wins, morning.losses), (3, 2, 1));
        approx(morning.pnl, 25.0);
        assert_eq!(stats.buckets[2].count, 1);
        assert_eq!(stats.buckets[4].count, 0);
        assert_eq!(stats.best_trading_time.period, "Morning (8-12 PM)");
    }

    #[test]
    fn falls_back_to_local_creation_hour() {
        // 03:00 UTC is 05:00 at +02:00
        let trades = vec![trade(1.0, at(2024, 1, 1, 3))];
        let stats = TimingService::new().time_of_day(&trades, &tz(2));
        assert_eq!(stats.buckets[0].session, TradingSession::EarlyMorning);
        assert_eq!(stats.buckets[0].count, 1);
    }

    #[test]
    fn stamped_entry_time_is_bucketed_at_local_hour() {
        // 14:00Z is 16:00 at +02:00
        let mut t = trade(5.0, at(2024, 3, 5, 9));
        t.entry_date = Some(tz(0).with_ymd_and_hms(2024, 3, 5, 14, 0, 0).unwrap().into());
        let stats = TimingService::new().time_of_day(&[t], &tz(2));
        let evening = stats
            .buckets
            .iter()
            .find(|b| b.session == TradingSession::Evening)
            .unwrap();
        assert_eq!(evening.count, 1);
        assert!(stats
            .buckets
            .iter()
            .filter(|b| b.session != TradingSession::Evening)
            .all(|b| b.count == 0));
    }

    #[test]
    fn small_buckets_are_never_best() {
        let trades = vec![
            with_entry_hour(trade(10.0, at(2024, 1, 1, 9)), 5),
            with_entry_hour(trade(10.0, at(2024, 1, 2, 9)), 6),
            with_entry_hour(trade(10.0, at(2024, 1, 3, 9)), 14),
            with_entry_hour(trade(-10.0, at(2024, 1, 4, 9)), 14),
            with_entry_hour(trade(-10.0, at(2024, 1, 5, 9)), 15),
        ];
        let stats = TimingService::new().time_of_day(&trades, &tz(0));
        let best = &stats.best_trading_time;
        assert_eq!(best.period, "Afternoon (12-4 PM)");
        approx(best.win_rate, 100.0 / 3.0);
        let bucket = stats
            .buckets
            .iter()
            .find(|b| b.session.label() == best.period)
            .unwrap();
        assert!(bucket.count >= 3);
    }

    #[test]
    fn ties_go_to_higher_pnl() {
        let mut trades = Vec::new();
        for (i, (hour, pnl)) in [(9, 10.0), (9, 10.0), (9, -1.0), (17, 50.0), (17, 50.0), (17, -1.0)]
            .into_iter()
            .enumerate()
        {
            trades.push(with_entry_hour(trade(pnl, at(2024, 1, 1, 0) + Duration::days(i as i64)), hour));
        }
        let stats = TimingService::new().time_of_day(&trades, &tz(0));
        assert_eq!(stats.best_trading_time.period, "Evening (4-8 PM)");
        approx(stats.best_trading_time.pnl, 99.0);
    }

    #[test]
    fn qualifying_bucket_without_wins_is_still_best() {
        let trades: Vec<Trade> = (0..3)
            .map(|i| with_entry_hour(trade(-5.0, at(2024, 1, 1, 0) + Duration::days(i)), 21))
            .collect();
        let stats = TimingService::new().time_of_day(&trades, &tz(0));
        assert_eq!(stats.best_trading_time.period, "Night (8 PM-4 AM)");
        approx(stats.best_trading_time.win_rate, 0.0);
    }

    #[test]
    fn empty_input_has_no_best_time() {
        let none: Vec<Trade> = Vec::new();
        let stats = TimingService::new().time_of_day(&none, &tz(0));
        assert_eq!(stats.best_trading_time.period, "");
        assert!(stats.buckets.iter().all(|b| b.count == 0 && b.win_rate == 0.0));
    }

    #[test]
    fn monthly_series_keeps_last_twelve_ascending() {
        let trades: Vec<Trade> = (0..14)
            .map(|i| {
                let year = 2023 + i / 12;
                let month = (i % 12) as u32 + 1;
                trade(10.0, at(year, month, 15, 12))
            })
            .collect();
        let series = TimingService::new().monthly_pnl(&trades, &tz(0));
        assert_eq!(series.len(), 12);
        assert_eq!(series.first().unwrap().month, "2023-03");
        assert_eq!(series.last().unwrap().month, "2024-02");
        assert!(series.windows(2).all(|w| w[0].month < w[1].month));
        let jan = series.iter().find(|m| m.month == "2024-01").unwrap();
        assert_eq!(jan.label, "Jan 24");
    }

    #[test]
    fn monthly_series_aggregates_per_month() {
        let trades = vec![
            trade(100.0, at(2024, 2, 1, 9)),
            trade(-40.0, at(2024, 2, 20, 9)),
            trade(5.0, at(2024, 3, 2, 9)),
        ];
        let series = TimingService::new().monthly_pnl(&trades, &tz(0));
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].trades, 2);
        assert_eq!(series[0].wins, 1);
        approx(series[0].pnl, 60.0);
        approx(series[0].win_rate, 50.0);
    }

    #[test]
    fn monthly_series_uses_local_month() {
        // 23:00 UTC on Jan 31 is Feb 1 at +02:00
        let trades = vec![trade(1.0, at(2024, 1, 31, 23))];
        let series = TimingService::new().monthly_pnl(&trades, &tz(2));
        assert_eq!(series[0].month, "2024-02");
    }

    #[test]
    fn weekly_series_is_last_seven_days() {
        let trades = vec![
            trade(30.0, at(2024, 3, 15, 1)),
            trade(-10.0, at(2024, 3, 15, 11)),
            trade(99.0, at(2024, 3, 8, 11)),
            trade(7.0, at(2024, 3, 9, 8)),
        ];
        let week = TimingService::new().weekly_pnl(&trades, now());
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, d(2024, 3, 9));
        assert_eq!(week[0].day, "Sat");
        approx(week[0].pnl, 7.0);
        let today = &week[6];
        assert_eq!(today.date, d(2024, 3, 15));
        assert_eq!(today.day, "Fri");
        assert_eq!((today.trades, today.wins), (2, 1));
        approx(today.pnl, 20.0);
        approx(today.win_rate, 50.0);
        assert!(week[1..6].iter().all(|day| day.trades == 0));
    }
}

// ═══════════════════════════════════════════════════════════════════
// CorrelationService
// ═══════════════════════════════════════════════════════════════════

mod correlation {
    use super::*;

    #[test]
    fn splits_days_by_review_score() {
        let trades = vec![
            trade(100.0, at(2024, 3, 1, 9)),
            trade(-50.0, at(2024, 3, 1, 14)),
            trade(-20.0, at(2024, 3, 2, 9)),
        ];
        let reviews = vec![review(d(2024, 3, 1), Some(8))];
        let c = CorrelationService::new().habit_trade_correlation(&trades, &reviews, &tz(0));

        let high = &c.high_discipline_days;
        assert_eq!((high.days, high.total, high.wins), (1, 2, 1));
        approx(high.pnl, 50.0);
        approx(high.win_rate, 50.0);
        approx(high.avg_pnl, 50.0);

        let low = &c.low_discipline_days;
        assert_eq!((low.days, low.total, low.wins), (1, 1, 0));
        approx(low.avg_pnl, -20.0);
    }

    #[test]
    fn seven_is_high_six_is_low() {
        let trades = vec![trade(1.0, at(2024, 3, 1, 9)), trade(1.0, at(2024, 3, 2, 9))];
        let reviews = vec![review(d(2024, 3, 1), Some(7)), review(d(2024, 3, 2), Some(6))];
        let c = CorrelationService::new().habit_trade_correlation(&trades, &reviews, &tz(0));
        assert_eq!(c.high_discipline_days.days, 1);
        assert_eq!(c.low_discipline_days.days, 1);
    }

    #[test]
    fn blank_review_score_counts_as_five() {
        let trades = vec![trade(1.0, at(2024, 3, 1, 9))];
        let reviews = vec![review(d(2024, 3, 1), None)];
        let c = CorrelationService::new().habit_trade_correlation(&trades, &reviews, &tz(0));
        assert_eq!(c.low_discipline_days.days, 1);
    }

    #[test]
    fn days_are_local_dates() {
        // 22:00 UTC on Mar 1 is Mar 2 at +03:00
        let trades = vec![trade(1.0, at(2024, 3, 1, 22))];
        let reviews = vec![review(d(2024, 3, 2), Some(9))];
        let c = CorrelationService::new().habit_trade_correlation(&trades, &reviews, &tz(3));
        assert_eq!(c.high_discipline_days.days, 1);
    }

    #[test]
    fn empty_input_is_zeroed() {
        let trades: Vec<Trade> = Vec::new();
        let reviews: Vec<DailyReview> = Vec::new();
        let c = CorrelationService::new().habit_trade_correlation(&trades, &reviews, &tz(0));
        assert_eq!(c.high_discipline_days.days, 0);
        approx(c.low_discipline_days.win_rate, 0.0);
        approx(c.low_discipline_days.avg_pnl, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ProgressService
// ═══════════════════════════════════════════════════════════════════

mod progress {
    use super::*;

    fn habit(name: &str, active: bool, current: u32, longest: u32, done: bool) -> Habit {
        let mut h = Habit::new(name, HabitCategory::Trading, at(2024, 1, 1, 6));
        h.is_active = active;
        h.current_streak = Some(current);
        h.longest_streak = Some(longest);
        h.completed_today = Some(done);
        h
    }

    #[test]
    fn habit_stats_over_active_habits() {
        let habits = vec![
            habit("Journal", true, 10, 12, true),
            habit("Exercise", true, 4, 6, false),
            habit("Old", false, 15, 20, true),
        ];
        let s = ProgressService::new().habit_stats(&habits);
        assert_eq!(s.total_active, 2);
        assert_eq!(s.completed_today, 1);
        approx(s.completion_rate, 50.0);
        approx(s.avg_streak, 7.0);
        assert_eq!(s.best_current_streak, 15);
        assert_eq!(s.max_streak, 20);
    }

    #[test]
    fn no_habits_is_zeroed() {
        assert_eq!(ProgressService::new().habit_stats(&[]), HabitStats::default());
    }

    #[test]
    fn goal_stats_guard_zero_targets() {
        let mut half = Goal::new("Half", GoalCategory::Trading, 200.0, "R", at(2024, 1, 1, 0));
        half.current_value = 100.0;
        let mut zero = Goal::new("Zero", GoalCategory::Trading, 0.0, "R", at(2024, 1, 1, 0));
        zero.current_value = 5.0;
        let mut done = Goal::new("Done", GoalCategory::Trading, 10.0, "R", at(2024, 1, 1, 0));
        done.status = GoalStatus::Completed;
        let s = ProgressService::new().goal_stats(&[half, zero, done]);
        assert_eq!(s.active, 2);
        assert_eq!(s.completed, 1);
        approx(s.avg_progress, 25.0);
    }

    #[test]
    fn budget_stats_and_upcoming_payments() {
        let today = d(2024, 3, 15);
        let salary = BudgetItem::new("Salary", BudgetType::Income, 3000.0, at(2024, 1, 1, 0));
        let mut rent = BudgetItem::new("Rent", BudgetType::Expense, 1200.0, at(2024, 1, 1, 0));
        rent.due_date = Some(d(2024, 3, 18));
        let mut later = BudgetItem::new("Insurance", BudgetType::Expense, 100.0, at(2024, 1, 1, 0));
        later.due_date = Some(d(2024, 3, 25));
        let mut paid = BudgetItem::new("Phone", BudgetType::Expense, 50.0, at(2024, 1, 1, 0));
        paid.due_date = Some(d(2024, 3, 16));
        paid.is_paid = true;
        let mut overdue = BudgetItem::new("Gym", BudgetType::Expense, 40.0, at(2024, 1, 1, 0));
        overdue.due_date = Some(d(2024, 3, 1));

        let s = ProgressService::new().budget_stats(&[salary, rent, later, paid, overdue], today);
        approx(s.total_income, 3000.0);
        approx(s.total_expenses, 1390.0);
        approx(s.net_cash_flow, 1610.0);
        let names: Vec<&str> = s.upcoming_payments.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Gym"]);
    }

    #[test]
    fn review_stats_default_scores_and_cap_lists() {
        let mut a = review(d(2024, 3, 1), Some(8));
        a.mood_score = Some(9);
        a.wins = vec!["a".into(), "b".into(), "c".into()];
        a.improvements = vec!["x".into()];
        let mut b = review(d(2024, 3, 2), None);
        b.wins = vec!["d".into(), "e".into(), "f".into()];

        let s = ProgressService::new().review_stats(&[a, b]);
        assert_eq!(s.reviews_completed, 2);
        approx(s.avg_overall, 6.5);
        approx(s.avg_mood, 7.0);
        approx(s.avg_energy, 5.0);
        assert_eq!(s.top_wins, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(s.top_improvements, vec!["x"]);
    }

    #[test]
    fn identity_score_weights() {
        let svc = ProgressService::new();
        assert_eq!(svc.identity_score(100.0, 100.0, 10.0, 100.0), 100);
        assert_eq!(svc.identity_score(0.0, 40.0, 8.0, 0.0), 30);
        assert_eq!(svc.identity_score(0.0, 0.0, 0.0, 0.0), 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// InsightService
// ═══════════════════════════════════════════════════════════════════

mod insights {
    use super::*;

    struct Fixture {
        summary: TradeSummary,
        pnl: PnlSummary,
        streaks: LossStreakStats,
        emotions: EmotionStats,
        habits: HabitStats,
    }

    impl Fixture {
        fn empty() -> Self {
            Self {
                summary: TradeSummary::default(),
                pnl: PnlSummary::default(),
                streaks: LossStreakStats::default(),
                emotions: EmotionStats::default(),
                habits: HabitStats::default(),
            }
        }

        fn ctx(&self, coverage: Option<ReviewCoverage>) -> InsightContext<'_> {
            InsightContext {
                summary: &self.summary,
                pnl: &self.pnl,
                loss_streaks: &self.streaks,
                emotions: &self.emotions,
                habits: &self.habits,
                review_coverage: coverage,
            }
        }
    }

    #[test]
    fn zero_trades_asks_to_start_logging() {
        let f = Fixture::empty();
        let out = InsightService::new().generate(&f.ctx(None));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, InsightKind::Info);
        assert_eq!(
            out[0].text,
            "Begin tracking your trades to unlock powerful analytics and insights."
        );
    }

    #[test]
    fn review_floor_only_when_coverage_given() {
        let f = Fixture::empty();
        let out = InsightService::new().generate(&f.ctx(Some(ReviewCoverage { completed: 2, floor: 5 })));
        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0].text,
            "Complete more daily reviews to track your progress and mindset."
        );
        let enough = InsightService::new().generate(&f.ctx(Some(ReviewCoverage { completed: 5, floor: 5 })));
        assert_eq!(enough.len(), 1);
    }

    #[test]
    fn weak_results_warn() {
        let mut f = Fixture::empty();
        f.summary = TradeSummary {
            total_trades: 5,
            wins: 1,
            losses: 4,
            win_rate: 20.0,
            total_pnl: -100.0,
            avg_discipline: 4.0,
            followed_plan_rate: 40.0,
        };
        f.streaks.max_consecutive_losses = 4;
        let out = InsightService::new().generate(&f.ctx(None));
        let texts: Vec<&str> = out.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Win rate of 20% needs improvement. Review your entry criteria.",
                "Discipline score of 4.0/10 is below target. Use the pre-trade checklist.",
                "Only 40% of trades followed your plan. Stick to your rules.",
                "You've had 4 consecutive losses. Consider stopping after 2-3 losses.",
            ]
        );
        assert!(out.iter().all(|i| i.kind == InsightKind::Warning));
    }

    #[test]
    fn halfway_values_round_up() {
        let mut f = Fixture::empty();
        f.summary = TradeSummary {
            total_trades: 8,
            wins: 5,
            losses: 3,
            win_rate: 62.5,
            total_pnl: 120.0,
            avg_discipline: 8.25,
            followed_plan_rate: 100.0,
        };
        let out = InsightService::new().generate(&f.ctx(None));
        let texts: Vec<&str> = out.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Excellent win rate of 63%! Keep up the great work.",
                "Strong discipline score of 8.3/10. Your trading plan is working.",
            ]
        );
    }

    #[test]
    fn warnings_need_enough_trades() {
        let mut f = Fixture::empty();
        f.summary.total_trades = 2;
        f.summary.win_rate = 0.0;
        f.summary.avg_discipline = 3.0;
        f.summary.followed_plan_rate = 0.0;
        assert!(InsightService::new().generate(&f.ctx(None)).is_empty());
    }

    #[test]
    fn strong_results_in_rule_order() {
        let mut f = Fixture::empty();
        f.summary = TradeSummary {
            total_trades: 10,
            wins: 7,
            losses: 3,
            win_rate: 70.0,
            total_pnl: 900.0,
            avg_discipline: 8.5,
            followed_plan_rate: 90.0,
        };
        f.pnl.risk_reward = 2.0;
        f.habits.avg_streak = 9.0;
        f.habits.completion_rate = 100.0;
        f.emotions = TradeStatsService::new().emotion_stats(&[
            with_emotion(trade(1.0, at(2024, 1, 1, 9)), "Calm"),
            with_emotion(trade(1.0, at(2024, 1, 2, 9)), "Calm"),
            with_emotion(trade(1.0, at(2024, 1, 3, 9)), "Calm"),
        ]);

        let out = InsightService::new().generate(&f.ctx(None));
        let texts: Vec<&str> = out.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Excellent win rate of 70%! Keep up the great work.",
                "Strong discipline score of 8.5/10. Your trading plan is working.",
                "Average habit streak of 9 days shows great consistency.",
                "You trade best when feeling \"Calm\" (100% win rate).",
                "Your R:R of 2.00 is excellent. Keep letting winners run!",
                "100% habit completion rate today. You're building strong discipline!",
            ]
        );
        assert_eq!(out[3].kind, InsightKind::Info);
    }

    #[test]
    fn under_sampled_best_emotion_is_not_surfaced() {
        let mut f = Fixture::empty();
        f.summary.total_trades = 1;
        f.emotions = TradeStatsService::new()
            .emotion_stats(&[with_emotion(trade(1.0, at(2024, 1, 1, 9)), "Calm")]);
        assert!(f.emotions.best_emotion.is_some());
        let out = InsightService::new().generate(&f.ctx(None));
        assert!(out.iter().all(|i| !i.text.contains("trade best")));
    }
}

// ═══════════════════════════════════════════════════════════════════
// ReportService
// ═══════════════════════════════════════════════════════════════════

mod report {
    use super::*;

    fn week_journal() -> Journal {
        let mut breakout_win = with_emotion(trade(100.0, at(2024, 3, 11, 10)), "Calm");
        breakout_win.strategy = Some("Breakout".into());
        let mut breakout_loss = with_emotion(trade(-40.0, at(2024, 3, 12, 10)), "Calm");
        breakout_loss.strategy = Some("Breakout".into());
        let mut reversal = with_emotion(trade(60.0, at(2024, 3, 13, 10)), "Calm");
        reversal.strategy = Some("Reversal".into());
        let previous_week = trade(-500.0, at(2024, 3, 9, 23));

        let mut this_week_review = review(d(2024, 3, 11), Some(8));
        this_week_review.wins = vec!["Patience".into()];

        Journal {
            trades: vec![reversal, breakout_loss, breakout_win, previous_week],
            daily_reviews: vec![this_week_review, review(d(2024, 3, 9), Some(4))],
            ..Journal::default()
        }
    }

    #[test]
    fn weekly_report() {
        let journal = week_journal();
        let r = ReportService::new()
            .period_report(&journal, ReportPeriod::Week, 0, now())
            .unwrap();

        assert_eq!(r.period, ReportPeriod::Week);
        assert_eq!(r.date_range.start.date_naive(), d(2024, 3, 10));
        assert_eq!(r.trading.total_trades, 3);
        assert_eq!((r.trading.wins, r.trading.losses), (2, 1));
        approx(r.trading.total_pnl, 120.0);
        assert_eq!(r.trading.best_trade.as_ref().unwrap().pnl(), 100.0);
        assert_eq!(r.trading.worst_trade.as_ref().unwrap().pnl(), -40.0);
        assert_eq!(r.trading.strategy_stats["Breakout"].losses, 1);
        approx(r.trading.strategy_stats["Reversal"].pnl, 60.0);
        assert_eq!(r.trading.emotion_stats["Calm"].count, 3);
        assert_eq!(r.reviews.reviews_completed, 1);
        assert_eq!(r.reviews.top_wins, vec!["Patience"]);
        assert_eq!(r.generated_at, now());

        assert_eq!(
            r.insights,
            vec![
                "Excellent win rate of 67%! Keep up the great work.",
                "Discipline score of 5.0/10 is below target. Use the pre-trade checklist.",
                "Complete more daily reviews to track your progress and mindset.",
                "You trade best when feeling \"Calm\" (67% win rate).",
                "Your R:R of 2.00 is excellent. Keep letting winners run!",
            ]
        );
    }

    #[test]
    fn previous_week_report() {
        let journal = week_journal();
        let r = ReportService::new()
            .period_report(&journal, ReportPeriod::Week, -1, now())
            .unwrap();
        assert_eq!(r.trading.total_trades, 1);
        approx(r.trading.total_pnl, -500.0);
        assert_eq!(r.reviews.reviews_completed, 1);
    }

    #[test]
    fn empty_journal_report() {
        let r = ReportService::new()
            .period_report(&Journal::default(), ReportPeriod::Month, 0, now())
            .unwrap();
        assert_eq!(r.trading.total_trades, 0);
        assert!(r.trading.best_trade.is_none());
        assert_eq!(
            r.insights,
            vec![
                "Complete more daily reviews to track your progress and mindset.",
                "Begin tracking your trades to unlock powerful analytics and insights.",
            ]
        );
    }

    #[test]
    fn report_json_round_trip() {
        let svc = ReportService::new();
        let mut journal = week_journal();
        journal.trades[0].profit_loss = Some(0.1 + 0.2);
        journal.trades[0].created_at = at(2024, 3, 13, 10) + Duration::nanoseconds(123_456_789);
        let report = svc.period_report(&journal, ReportPeriod::Week, 0, now()).unwrap();

        let json = svc.export_report_json(&report).unwrap();
        assert!(json.contains("\"totalPnL\""));
        assert!(json.contains("\"dateRange\""));
        assert!(json.contains("\"generatedAt\""));

        let parsed = svc.parse_report_json(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = ReportService::new().parse_report_json("{\"period\":").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn analytics_overview_for_month() {
        let mut journal = week_journal();
        journal.trades.push(trade(1000.0, at(2024, 1, 5, 10)));
        let o = ReportService::new()
            .analytics_overview(&journal, TimeRange::Month, now())
            .unwrap();
        assert_eq!(o.range, TimeRange::Month);
        assert_eq!(o.summary.total_trades, 4);
        approx(o.summary.total_pnl, -380.0);
        assert_eq!(o.monthly_pnl.len(), 1);
        assert_eq!(o.weekly_pnl.len(), 7);
        assert_eq!(o.strategy_stats.len(), 3);
        assert_eq!(o.time_of_day.buckets.len(), 5);
        assert!(o
            .insights
            .iter()
            .all(|i| i.text != "Complete more daily reviews to track your progress and mindset."));
    }

    #[test]
    fn dashboard_over_whole_journal() {
        let mut journal = week_journal();
        let mut h = Habit::new("Journal", HabitCategory::Trading, at(2024, 1, 1, 6));
        h.completed_today = Some(true);
        h.current_streak = Some(3);
        h.longest_streak = Some(8);
        journal.habits.push(h);

        let dash = ReportService::new().dashboard(&journal, now());
        assert_eq!(dash.total_trades, 4);
        approx(dash.win_rate, 50.0);
        approx(dash.total_pnl, -380.0);
        assert_eq!(dash.weekly_trades, 4);
        approx(dash.avg_discipline_score, 5.0);
        assert_eq!(dash.current_habit_streak, 3);
        assert_eq!(dash.longest_habit_streak, 8);
        assert_eq!((dash.habits_completed_today, dash.total_habits), (1, 1));
        // 100 × 0.3 + 50 × 0.25 + 50 × 0.25 + 0 × 0.2
        assert_eq!(dash.identity_score, 55);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ExportService
// ═══════════════════════════════════════════════════════════════════

mod export {
    use super::*;

    #[test]
    fn trades_csv_has_fixed_columns_and_escapes_quotes() {
        let mut t = trade(150.0, at(2024, 1, 15, 14));
        t.symbol = "AAPL".into();
        t.entry_price = Some(185.5);
        t.discipline_score = Some(8);
        t.followed_plan = true;
        t.lessons_learned = Some("He said \"wait\", I didn't".into());

        let csv = ExportService::new().trades_csv(&[t], &tz(0)).unwrap();
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("\"Date\",\"Symbol\",\"Type\""));
        assert!(header.ends_with("\"Followed Plan\",\"Lessons Learned\""));
        let row = lines.next().unwrap();
        assert!(row.starts_with("\"2024-01-15\",\"AAPL\",\"long\",185.5,"));
        assert!(row.contains(",150,"));
        assert!(row.contains(",8,\"Yes\","));
        assert!(row.ends_with("\"He said \"\"wait\"\", I didn't\""));
        assert!(lines.next().is_none());
    }

    #[test]
    fn trade_csv_date_is_local() {
        let t = trade(1.0, at(2024, 1, 15, 23));
        let csv = ExportService::new().trades_csv(&[t], &tz(2)).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("\"2024-01-16\""));
    }

    #[test]
    fn reviews_csv_joins_lists() {
        let mut r = review(d(2024, 1, 1), Some(7));
        r.wins = vec!["Waited for setup".into(), "Cut loser".into()];
        r.gratitude = vec!["Family".into()];
        r.notes = Some("Solid \"A\" day".into());

        let csv = ExportService::new().reviews_csv(&[r]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"2024-01-01\","));
        assert!(row.contains("\"Waited for setup; Cut loser\""));
        assert!(row.contains("\"Family\""));
        assert!(row.contains(",7,"));
        assert!(row.ends_with("\"Solid \"\"A\"\" day\""));
    }

    #[test]
    fn empty_exports_have_only_headers() {
        let none: Vec<DailyReview> = Vec::new();
        let csv = ExportService::new().reviews_csv(&none).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.contains("\"Morning Mindset\""));
    }

    #[test]
    fn backup_round_trip() {
        let svc = ExportService::new();
        let mut journal = Journal::default();
        journal.trades.push(trade(42.0, at(2024, 1, 2, 3)));
        journal.daily_reviews.push(review(d(2024, 1, 2), Some(6)));

        let json = svc.backup_json(&journal, now()).unwrap();
        assert!(json.contains("\"exportDate\""));
        assert!(json.contains("\"version\": \"1.0\""));
        assert!(json.contains("\"dailyReviews\""));

        let doc = svc.parse_backup(&json).unwrap();
        assert_eq!(doc.export_date, now());
        assert_eq!(doc.journal, journal);
    }

    #[test]
    fn partial_backup_fills_defaults() {
        let json = r#"{"exportDate":"2024-03-15T12:00:00Z","version":"1.0","trades":[]}"#;
        let doc = ExportService::new().parse_backup(json).unwrap();
        assert!(doc.journal.habits.is_empty());
        assert_eq!(doc.journal.settings, Settings::default());
    }
}
