use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default limit for the consecutive-loss alert.
pub const DEFAULT_MAX_CONSECUTIVE_LOSSES: u32 = 3;

/// Default daily loss limit in currency units.
pub const DEFAULT_MAX_DAILY_LOSS: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// One item of the pre-trade checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingRule {
    pub id: String,
    pub text: String,
    pub is_active: bool,
}

impl TradingRule {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_active: true,
        }
    }
}

/// User-configurable settings, stored in `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub identity_statement: String,

    pub display_name: String,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub notifications: bool,

    /// "HH:MM", local time.
    #[serde(default)]
    pub daily_reminder_time: Option<String>,

    /// Pre-trade checklist.
    #[serde(default)]
    pub trading_rules: Vec<TradingRule>,

    /// Consecutive losses that trigger the stop-trading alert.
    #[serde(default = "default_max_consecutive_losses")]
    pub max_consecutive_losses: u32,

    /// Net loss for a single day that triggers the daily loss alert.
    #[serde(default = "default_max_daily_loss")]
    pub max_daily_loss: f64,
}

fn default_max_consecutive_losses() -> u32 {
    DEFAULT_MAX_CONSECUTIVE_LOSSES
}

fn default_max_daily_loss() -> f64 {
    DEFAULT_MAX_DAILY_LOSS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            identity_statement: "I am becoming an elite trader with unwavering discipline.".to_string(),
            display_name: "Elite Trader".to_string(),
            theme: Theme::Dark,
            notifications: true,
            daily_reminder_time: None,
            trading_rules: default_trading_rules(),
            max_consecutive_losses: DEFAULT_MAX_CONSECUTIVE_LOSSES,
            max_daily_loss: DEFAULT_MAX_DAILY_LOSS,
        }
    }
}

impl Settings {
    /// Rules currently shown on the pre-trade checklist.
    pub fn active_rules(&self) -> impl Iterator<Item = &TradingRule> {
        self.trading_rules.iter().filter(|r| r.is_active)
    }

    /// True when every active rule id appears in `checked`.
    pub fn checklist_complete<'a>(&self, checked: impl IntoIterator<Item = &'a str>) -> bool {
        let checked: HashSet<&str> = checked.into_iter().collect();
        self.active_rules().all(|r| checked.contains(r.id.as_str()))
    }
}

fn default_trading_rules() -> Vec<TradingRule> {
    [
        "I have identified a clear setup with defined entry, stop loss, and target",
        "This trade aligns with my trading plan and strategy",
        "I am not revenge trading or trying to recover losses",
        "My position size is within my risk management rules",
        "I am emotionally stable and not trading out of boredom or FOMO",
        "I have checked for upcoming news events that could affect this trade",
        "I am willing to accept the loss if this trade goes against me",
    ]
    .iter()
    .enumerate()
    .map(|(i, text)| TradingRule::new((i + 1).to_string(), *text))
    .collect()
}
