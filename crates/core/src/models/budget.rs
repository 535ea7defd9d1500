use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePeriod {
    Weekly,
    Monthly,
    Yearly,
}

/// One income or expense line of the personal budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub category: String,

    pub amount: f64,

    #[serde(rename = "type")]
    pub budget_type: BudgetType,

    #[serde(default)]
    pub is_recurring: bool,

    #[serde(default)]
    pub recurrence_period: Option<RecurrencePeriod>,

    #[serde(default, with = "super::optional_date")]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub is_paid: bool,

    #[serde(default)]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl BudgetItem {
    pub fn new(
        name: impl Into<String>,
        budget_type: BudgetType,
        amount: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category: "Other".to_string(),
            amount,
            budget_type,
            is_recurring: false,
            recurrence_period: None,
            due_date: None,
            is_paid: false,
            notes: None,
            created_at,
        }
    }
}
