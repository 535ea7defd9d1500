use std::borrow::Borrow;
use std::collections::BTreeMap;

use crate::models::analytics::{
    EmotionStat, EmotionStats, EmotionTally, PnlSummary, StrategyStat, TradeSummary,
};
use crate::models::trade::Trade;

/// Samples an emotion group needs before it can be called best or worst.
pub const MIN_EMOTION_SAMPLES: usize = 3;

/// Outcome counts, P&L and per-label breakdowns over a set of trades.
///
/// Every method accepts owned trades or references and never fails: an empty
/// slice yields zeroed statistics.
pub struct TradeStatsService;

impl TradeStatsService {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize<T: Borrow<Trade>>(&self, trades: &[T]) -> TradeSummary {
        let total = trades.len();
        let mut summary = TradeSummary {
            total_trades: total,
            ..TradeSummary::default()
        };
        if total == 0 {
            return summary;
        }

        let mut discipline_sum = 0.0;
        let mut followed = 0usize;
        for trade in trades.iter().map(Borrow::borrow) {
            if trade.is_win() {
                summary.wins += 1;
            } else if trade.is_loss() {
                summary.losses += 1;
            }
            summary.total_pnl += trade.pnl();
            discipline_sum += trade.discipline();
            if trade.followed_plan {
                followed += 1;
            }
        }

        summary.win_rate = percent(summary.wins, total);
        summary.avg_discipline = discipline_sum / total as f64;
        summary.followed_plan_rate = percent(followed, total);
        summary
    }

    /// Total, average win, average loss (absolute) and risk:reward.
    pub fn pnl_summary<T: Borrow<Trade>>(&self, trades: &[T]) -> PnlSummary {
        let (mut win_sum, mut win_count) = (0.0, 0usize);
        let (mut loss_sum, mut loss_count) = (0.0, 0usize);
        let mut total = 0.0;

        for trade in trades.iter().map(Borrow::borrow) {
            let pnl = trade.pnl();
            total += pnl;
            if pnl > 0.0 {
                win_sum += pnl;
                win_count += 1;
            } else if pnl < 0.0 {
                loss_sum += pnl;
                loss_count += 1;
            }
        }

        let avg_win = mean(win_sum, win_count);
        let avg_loss = mean(loss_sum, loss_count).abs();
        let risk_reward = if avg_loss > 0.0 { avg_win / avg_loss } else { 0.0 };

        PnlSummary {
            total_pnl: total,
            avg_win,
            avg_loss,
            risk_reward,
        }
    }

    /// Highest and lowest P&L trade. With one trade both are that trade;
    /// on ties the earlier trade in input order wins the best slot.
    pub fn best_and_worst<T: Borrow<Trade>>(&self, trades: &[T]) -> (Option<Trade>, Option<Trade>) {
        let mut sorted: Vec<&Trade> = trades.iter().map(Borrow::borrow).collect();
        sorted.sort_by(|a, b| b.pnl().total_cmp(&a.pnl()));
        (
            sorted.first().map(|t| (*t).clone()),
            sorted.last().map(|t| (*t).clone()),
        )
    }

    /// Wins, losses and P&L per strategy. Break-even trades count toward
    /// neither wins nor losses. No minimum sample size.
    pub fn strategy_breakdown<T: Borrow<Trade>>(&self, trades: &[T]) -> BTreeMap<String, StrategyStat> {
        let mut stats: BTreeMap<String, StrategyStat> = BTreeMap::new();
        for trade in trades.iter().map(Borrow::borrow) {
            let entry = stats.entry(trade.strategy_label().to_string()).or_default();
            if trade.is_win() {
                entry.wins += 1;
            } else if trade.is_loss() {
                entry.losses += 1;
            }
            entry.pnl += trade.pnl();
        }
        stats
    }

    /// Per-emotion statistics sorted by win rate (highest first).
    ///
    /// Groups keep first-appearance order among equal win rates. The best
    /// emotion is the top group with at least three samples, falling back to
    /// the top group overall. The worst emotion only considers groups with at
    /// least three samples.
    pub fn emotion_stats<T: Borrow<Trade>>(&self, trades: &[T]) -> EmotionStats {
        struct Acc {
            emotion: String,
            count: usize,
            wins: usize,
            pnl: f64,
            discipline: f64,
        }

        let mut groups: Vec<Acc> = Vec::new();
        for trade in trades.iter().map(Borrow::borrow) {
            let label = trade.emotion_label();
            let idx = match groups.iter().position(|g| g.emotion == label) {
                Some(idx) => idx,
                None => {
                    groups.push(Acc {
                        emotion: label.to_string(),
                        count: 0,
                        wins: 0,
                        pnl: 0.0,
                        discipline: 0.0,
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[idx];
            group.count += 1;
            if trade.is_win() {
                group.wins += 1;
            }
            group.pnl += trade.pnl();
            group.discipline += trade.discipline();
        }

        let mut stats: Vec<EmotionStat> = groups
            .into_iter()
            .map(|g| EmotionStat {
                win_rate: percent(g.wins, g.count),
                avg_pnl: mean(g.pnl, g.count),
                avg_discipline: mean(g.discipline, g.count),
                emotion: g.emotion,
                count: g.count,
                wins: g.wins,
                total_pnl: g.pnl,
            })
            .collect();
        stats.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));

        let best_emotion = stats
            .iter()
            .find(|s| s.count >= MIN_EMOTION_SAMPLES)
            .or_else(|| stats.first())
            .cloned();
        let worst_emotion = stats
            .iter()
            .filter(|s| s.count >= MIN_EMOTION_SAMPLES)
            .min_by(|a, b| a.win_rate.total_cmp(&b.win_rate))
            .cloned();

        EmotionStats {
            stats,
            best_emotion,
            worst_emotion,
        }
    }

    /// Count, wins and P&L per pre-trade emotion, keyed by label.
    pub fn emotion_tallies<T: Borrow<Trade>>(&self, trades: &[T]) -> BTreeMap<String, EmotionTally> {
        let mut tallies: BTreeMap<String, EmotionTally> = BTreeMap::new();
        for trade in trades.iter().map(Borrow::borrow) {
            let entry = tallies.entry(trade.emotion_label().to_string()).or_default();
            entry.count += 1;
            if trade.is_win() {
                entry.wins += 1;
            }
            entry.pnl += trade.pnl();
        }
        tallies
    }
}

impl Default for TradeStatsService {
    fn default() -> Self {
        Self::new()
    }
}

/// `part / whole × 100`, 0 for an empty whole.
pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// `sum / count`, 0 for an empty set.
pub(crate) fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
