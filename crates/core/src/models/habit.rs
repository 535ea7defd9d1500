use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category a habit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Trading,
    Health,
    Mindset,
    Productivity,
    #[default]
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    #[default]
    Daily,
    Weekly,
}

/// A tracked daily/weekly habit.
///
/// Streak counters are kept on the habit itself (camelCase on disk, as the
/// habit tracker writes them) and only change through completion toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: HabitCategory,

    #[serde(default)]
    pub frequency: HabitFrequency,

    #[serde(default)]
    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    #[serde(rename = "currentStreak", default)]
    pub current_streak: Option<u32>,

    #[serde(rename = "longestStreak", default)]
    pub longest_streak: Option<u32>,

    #[serde(rename = "completedToday", default)]
    pub completed_today: Option<bool>,
}

impl Habit {
    pub fn new(name: impl Into<String>, category: HabitCategory, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            category,
            frequency: HabitFrequency::Daily,
            is_active: true,
            created_at,
            current_streak: None,
            longest_streak: None,
            completed_today: None,
        }
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak.unwrap_or(0)
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak.unwrap_or(0)
    }

    pub fn is_completed_today(&self) -> bool {
        self.completed_today.unwrap_or(false)
    }

    /// Flip today's completion, adjusting the streak counters.
    ///
    /// Completing extends the current streak by one and raises the longest
    /// streak if needed. Un-completing takes the day back (never below 0).
    pub fn toggle_completion(&mut self) {
        let was_completed = self.is_completed_today();
        let streak = if was_completed {
            self.current_streak.unwrap_or(1).saturating_sub(1)
        } else {
            self.current_streak() + 1
        };
        self.completed_today = Some(!was_completed);
        self.current_streak = Some(streak);
        self.longest_streak = Some(streak.max(self.longest_streak()));
    }
}
