use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// When a psychology check-in was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MindsetLogType {
    PreTrade,
    PostTrade,
    DailyCheckin,
}

/// A psychology check-in: emotion, its intensity, and what was going on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindsetLog {
    pub id: String,

    pub log_type: MindsetLogType,

    #[serde(default)]
    pub emotion: Option<String>,

    /// 1 to 10
    #[serde(default)]
    pub intensity: Option<u8>,

    #[serde(default)]
    pub triggers: Vec<String>,

    #[serde(default)]
    pub coping_strategies: Vec<String>,

    #[serde(default)]
    pub cognitive_biases: Vec<String>,

    #[serde(default)]
    pub notes: Option<String>,

    pub logged_at: DateTime<Utc>,
}

impl MindsetLog {
    pub fn new(log_type: MindsetLogType, emotion: impl Into<String>, logged_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            log_type,
            emotion: Some(emotion.into()),
            intensity: None,
            triggers: Vec::new(),
            coping_strategies: Vec::new(),
            cognitive_biases: Vec::new(),
            notes: None,
            logged_at,
        }
    }
}
