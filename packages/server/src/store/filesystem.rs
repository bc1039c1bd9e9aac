use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::{AccountStore, StoreError};
use crate::domain::Account;

/// One JSON document per account under the data directory.
///
/// Writes go to a temp file and are committed with a rename, so readers
/// never observe a partially written document. Account names are validated
/// at creation time to be safe path segments.
pub struct FilesystemAccountStore {
    base_path: PathBuf,
}

impl FilesystemAccountStore {
    pub async fn new(base_path: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self { base_path })
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{name}.json"))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl AccountStore for FilesystemAccountStore {
    async fn load(&self, name: &str) -> Result<Option<Account>, StoreError> {
        match fs::read(self.document_path(name)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(account)?;
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, &bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&temp_path, self.document_path(&account.name)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<bool, StoreError> {
        match fs::remove_file(self.document_path(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            if let Some(name) = file_name.to_str().and_then(|n| n.strip_suffix(".json")) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
