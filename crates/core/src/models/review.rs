use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Score used for review fields that were left blank.
pub const DEFAULT_REVIEW_SCORE: u8 = 5;

/// End-of-day review. At most one exists per `review_date`; saving a review
/// for a date that already has one replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReview {
    pub id: String,

    /// Calendar date this review covers (the uniqueness key).
    pub review_date: NaiveDate,

    #[serde(default)]
    pub morning_mindset: Option<String>,

    #[serde(default)]
    pub energy_level: Option<u8>,

    #[serde(default)]
    pub focus_level: Option<u8>,

    #[serde(default)]
    pub mood_score: Option<u8>,

    #[serde(default)]
    pub wins: Vec<String>,

    #[serde(default)]
    pub improvements: Vec<String>,

    #[serde(default)]
    pub gratitude: Vec<String>,

    #[serde(default)]
    pub tomorrow_priorities: Vec<String>,

    #[serde(default)]
    pub overall_score: Option<u8>,

    #[serde(default)]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl DailyReview {
    pub fn new(review_date: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            review_date,
            morning_mindset: None,
            energy_level: None,
            focus_level: None,
            mood_score: None,
            wins: Vec::new(),
            improvements: Vec::new(),
            gratitude: Vec::new(),
            tomorrow_priorities: Vec::new(),
            overall_score: None,
            notes: None,
            created_at,
        }
    }

    pub fn overall(&self) -> f64 {
        score_or_default(self.overall_score)
    }

    pub fn mood(&self) -> f64 {
        score_or_default(self.mood_score)
    }

    pub fn energy(&self) -> f64 {
        score_or_default(self.energy_level)
    }
}

fn score_or_default(score: Option<u8>) -> f64 {
    match score {
        Some(s) if s > 0 => f64::from(s),
        _ => f64::from(DEFAULT_REVIEW_SCORE),
    }
}
