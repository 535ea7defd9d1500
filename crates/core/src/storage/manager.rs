use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::CoreError;
use crate::models::journal::Journal;

use super::repository::{Collection, JournalRepository};

/// Converts between a `Journal` and its per-collection JSON documents.
pub struct StorageManager;

impl StorageManager {
    /// Read every collection from the repository.
    ///
    /// Missing or blank documents become empty collections (default settings);
    /// a document that exists but does not parse is an error.
    pub async fn load_journal(repo: &dyn JournalRepository) -> Result<Journal, CoreError> {
        let journal = Journal {
            habits: Self::load_or_default(repo, Collection::Habits).await?,
            trades: Self::load_or_default(repo, Collection::Trades).await?,
            goals: Self::load_or_default(repo, Collection::Goals).await?,
            budget_items: Self::load_or_default(repo, Collection::Budget).await?,
            daily_reviews: Self::load_or_default(repo, Collection::DailyReviews).await?,
            mindset_logs: Self::load_or_default(repo, Collection::MindsetLogs).await?,
            settings: Self::load_or_default(repo, Collection::Settings).await?,
        };
        tracing::info!(
            trades = journal.trades.len(),
            habits = journal.habits.len(),
            reviews = journal.daily_reviews.len(),
            "journal loaded"
        );
        Ok(journal)
    }

    /// Write one collection of `journal` as a pretty-printed JSON document.
    pub async fn save_collection(
        repo: &dyn JournalRepository,
        journal: &Journal,
        collection: Collection,
    ) -> Result<(), CoreError> {
        let document = Self::to_document(journal, collection)?;
        repo.save(collection, document).await?;
        tracing::info!(%collection, "collection saved");
        Ok(())
    }

    /// Write every collection.
    pub async fn save_journal(repo: &dyn JournalRepository, journal: &Journal) -> Result<(), CoreError> {
        for collection in Collection::ALL {
            Self::save_collection(repo, journal, collection).await?;
        }
        Ok(())
    }

    pub fn to_document(journal: &Journal, collection: Collection) -> Result<String, CoreError> {
        match collection {
            Collection::Habits => pretty(&journal.habits),
            Collection::Trades => pretty(&journal.trades),
            Collection::Goals => pretty(&journal.goals),
            Collection::Budget => pretty(&journal.budget_items),
            Collection::DailyReviews => pretty(&journal.daily_reviews),
            Collection::MindsetLogs => pretty(&journal.mindset_logs),
            Collection::Settings => pretty(&journal.settings),
        }
    }

    async fn load_or_default<T>(repo: &dyn JournalRepository, collection: Collection) -> Result<T, CoreError>
    where
        T: DeserializeOwned + Default,
    {
        match repo.load(collection).await? {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(&text)
                .map_err(|e| CoreError::Deserialization(format!("{collection}: {e}"))),
            _ => {
                if collection == Collection::Settings {
                    tracing::warn!("no saved settings, using defaults");
                }
                Ok(T::default())
            }
        }
    }
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string_pretty(value).map_err(|e| CoreError::Serialization(e.to_string()))
}
