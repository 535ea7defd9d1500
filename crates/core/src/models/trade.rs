use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discipline score used wherever a trade has none recorded.
pub const DEFAULT_DISCIPLINE_SCORE: u8 = 5;

/// Label used for trades without a recorded emotion or strategy.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    Long,
    Short,
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeType::Long => write!(f, "long"),
            TradeType::Short => write!(f, "short"),
        }
    }
}

/// Win/loss classification by the sign of the realized P&L.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    Win,
    Loss,
    Breakeven,
}

/// Entry or exit time of a trade.
///
/// Form input carries no offset and is already local wall-clock time. Stamped
/// times are RFC 3339 instants and only become local once an offset is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeTime {
    Local(NaiveDateTime),
    Instant(DateTime<FixedOffset>),
}

impl TradeTime {
    /// Wall-clock reading at the given offset.
    pub fn local(&self, offset: &FixedOffset) -> NaiveDateTime {
        match self {
            TradeTime::Local(dt) => *dt,
            TradeTime::Instant(dt) => dt.with_timezone(offset).naive_local(),
        }
    }
}

impl From<NaiveDateTime> for TradeTime {
    fn from(dt: NaiveDateTime) -> Self {
        TradeTime::Local(dt)
    }
}

impl From<DateTime<FixedOffset>> for TradeTime {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        TradeTime::Instant(dt)
    }
}

/// A single journaled trade.
///
/// Field names match the on-disk `trades.json` documents. All numeric fields
/// except the id and creation time are optional; use the accessor methods
/// (`pnl()`, `discipline()`, `emotion_label()`, `strategy_label()`) instead of
/// reading the raw options so that every aggregator applies the same defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,

    pub symbol: String,

    pub trade_type: TradeType,

    #[serde(default)]
    pub entry_price: Option<f64>,

    #[serde(default)]
    pub exit_price: Option<f64>,

    #[serde(default)]
    pub position_size: Option<f64>,

    /// Realized gain/loss in currency units. Absent counts as 0.
    #[serde(default)]
    pub profit_loss: Option<f64>,

    /// Entry time, either typed into the journal form or stamped by the app.
    #[serde(default, with = "trade_time")]
    pub entry_date: Option<TradeTime>,

    #[serde(default, with = "trade_time")]
    pub exit_date: Option<TradeTime>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub strategy: Option<String>,

    #[serde(default)]
    pub timeframe: Option<String>,

    #[serde(default)]
    pub setup_type: Option<String>,

    #[serde(default)]
    pub pre_trade_emotion: Option<String>,

    #[serde(default)]
    pub post_trade_emotion: Option<String>,

    /// Self-reported rule adherence, 1 to 10.
    #[serde(default)]
    pub discipline_score: Option<u8>,

    #[serde(default)]
    pub followed_plan: bool,

    #[serde(default)]
    pub checklist_completed: Option<bool>,

    #[serde(default)]
    pub lessons_learned: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// File name of the attached chart screenshot, if any.
    #[serde(default)]
    pub screenshot_url: Option<String>,
}

impl Trade {
    /// Create a trade with a fresh id. Everything optional starts empty.
    pub fn new(symbol: impl Into<String>, trade_type: TradeType, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            symbol: symbol.into().trim().to_uppercase(),
            trade_type,
            entry_price: None,
            exit_price: None,
            position_size: None,
            profit_loss: None,
            entry_date: None,
            exit_date: None,
            created_at,
            strategy: None,
            timeframe: None,
            setup_type: None,
            pre_trade_emotion: None,
            post_trade_emotion: None,
            discipline_score: None,
            followed_plan: false,
            checklist_completed: None,
            lessons_learned: None,
            notes: None,
            tags: Vec::new(),
            screenshot_url: None,
        }
    }

    /// Builder-style setter for the realized P&L.
    #[must_use]
    pub fn with_pnl(mut self, pnl: f64) -> Self {
        self.profit_loss = Some(pnl);
        self
    }

    /// Realized P&L, 0 when absent or not a number.
    pub fn pnl(&self) -> f64 {
        match self.profit_loss {
            Some(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }

    /// Discipline score, defaulting to 5 when absent (a stored 0 also means "unset").
    pub fn discipline(&self) -> f64 {
        match self.discipline_score {
            Some(score) if score > 0 => f64::from(score),
            _ => f64::from(DEFAULT_DISCIPLINE_SCORE),
        }
    }

    pub fn outcome(&self) -> TradeOutcome {
        let pnl = self.pnl();
        if pnl > 0.0 {
            TradeOutcome::Win
        } else if pnl < 0.0 {
            TradeOutcome::Loss
        } else {
            TradeOutcome::Breakeven
        }
    }

    pub fn is_win(&self) -> bool {
        self.outcome() == TradeOutcome::Win
    }

    pub fn is_loss(&self) -> bool {
        self.outcome() == TradeOutcome::Loss
    }

    /// Pre-trade emotion, or "Unknown".
    pub fn emotion_label(&self) -> &str {
        non_empty_or_unknown(self.pre_trade_emotion.as_deref())
    }

    /// Strategy name, or "Unknown".
    pub fn strategy_label(&self) -> &str {
        non_empty_or_unknown(self.strategy.as_deref())
    }
}

fn non_empty_or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN_LABEL,
    }
}

/// Serde adapter for trade timestamps.
///
/// Accepts RFC 3339 (kept as an instant), `YYYY-MM-DDTHH:MM` and
/// `YYYY-MM-DDTHH:MM:SS[.fff]`. Empty strings read as `None`. Instants are
/// written back with their offset and local times without one, both keeping
/// fractional seconds.
mod trade_time {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TradeTime;

    const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
    const READ_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

    pub fn serialize<S>(value: &Option<TradeTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(TradeTime::Local(dt)) => serializer.serialize_some(&dt.format(WRITE_FORMAT).to_string()),
            Some(TradeTime::Instant(dt)) => {
                serializer.serialize_some(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<TradeTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Some(TradeTime::Instant(dt)));
        }
        READ_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|dt| Some(TradeTime::Local(dt)))
            .ok_or_else(|| serde::de::Error::custom(format!("invalid trade timestamp '{raw}'")))
    }
}
