use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;

use super::repository::{Collection, JournalRepository};

/// Stores each collection as `<data_dir>/<collection>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    data_dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }
}

#[async_trait]
impl JournalRepository for JsonFileRepository {
    async fn load(&self, collection: Collection) -> Result<Option<String>, CoreError> {
        let path = self.path_for(collection);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::FileIO(format!("{}: {e}", path.display()))),
        }
    }

    async fn save(&self, collection: Collection, document: String) -> Result<(), CoreError> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        let path = self.path_for(collection);
        tokio::fs::write(&path, document)
            .await
            .map_err(|e| CoreError::FileIO(format!("{}: {e}", path.display())))
    }
}
