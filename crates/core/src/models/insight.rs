use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
}

/// A rule-generated recommendation shown alongside the statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub text: String,
}

impl Insight {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: InsightKind::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { kind: InsightKind::Warning, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: InsightKind::Info, text: text.into() }
    }
}
