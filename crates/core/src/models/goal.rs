use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Trading,
    Financial,
    Health,
    Personal,
    Career,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Paused,
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalStatus::Active => write!(f, "active"),
            GoalStatus::Completed => write!(f, "completed"),
            GoalStatus::Paused => write!(f, "paused"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub target_value: f64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A measurable goal (e.g. "reach 10k account balance").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub category: GoalCategory,

    pub target_value: f64,

    #[serde(default)]
    pub current_value: f64,

    #[serde(default)]
    pub unit: String,

    #[serde(default, with = "super::optional_date")]
    pub deadline: Option<NaiveDate>,

    #[serde(default)]
    pub status: GoalStatus,

    #[serde(default)]
    pub milestones: Vec<Milestone>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(
        title: impl Into<String>,
        category: GoalCategory,
        target_value: f64,
        unit: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            category,
            target_value,
            current_value: 0.0,
            unit: unit.into(),
            deadline: None,
            status: GoalStatus::Active,
            milestones: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Progress as a percentage of the target. A zero target yields 0, not NaN.
    pub fn progress_pct(&self) -> f64 {
        if self.target_value == 0.0 {
            0.0
        } else {
            self.current_value / self.target_value * 100.0
        }
    }
}
