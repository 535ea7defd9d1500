use async_trait::async_trait;

use crate::errors::CoreError;

/// The persisted collections, one JSON document each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Habits,
    Trades,
    Goals,
    Budget,
    DailyReviews,
    MindsetLogs,
    Settings,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Habits,
        Collection::Trades,
        Collection::Goals,
        Collection::Budget,
        Collection::DailyReviews,
        Collection::MindsetLogs,
        Collection::Settings,
    ];

    /// File name of the document holding this collection.
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Habits => "habits.json",
            Collection::Trades => "trades.json",
            Collection::Goals => "goals.json",
            Collection::Budget => "budget.json",
            Collection::DailyReviews => "dailyReviews.json",
            Collection::MindsetLogs => "mindsetLogs.json",
            Collection::Settings => "settings.json",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Where collection documents live.
///
/// Implementations only move raw JSON text around; parsing and defaults are
/// handled by `StorageManager`. Each save replaces the whole document (last
/// write wins).
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Raw document for a collection, `None` if it was never saved.
    async fn load(&self, collection: Collection) -> Result<Option<String>, CoreError>;

    async fn save(&self, collection: Collection, document: String) -> Result<(), CoreError>;
}
