use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::errors::CoreError;

use super::repository::{Collection, JournalRepository};

/// Keeps documents in memory. Useful for tests and for hosts that persist
/// through their own bridge.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    documents: RwLock<HashMap<Collection, String>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw document currently stored for a collection.
    pub async fn document(&self, collection: Collection) -> Option<String> {
        self.documents.read().await.get(&collection).cloned()
    }

    /// Number of collections that have been written at least once.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl JournalRepository for InMemoryRepository {
    async fn load(&self, collection: Collection) -> Result<Option<String>, CoreError> {
        Ok(self.document(collection).await)
    }

    async fn save(&self, collection: Collection, document: String) -> Result<(), CoreError> {
        self.documents.write().await.insert(collection, document);
        Ok(())
    }
}
