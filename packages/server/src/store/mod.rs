mod filesystem;
mod memory;

pub use filesystem::FilesystemAccountStore;
pub use memory::MemoryAccountStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Account;

/// Errors from the account document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt account document: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Whole-document persistence for accounts.
///
/// `save` is an upsert of the entire account; partial writes are never
/// issued, so a document on disk is always internally consistent. Callers
/// serialize load-mutate-save sequences through the mutation coordinator.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn load(&self, name: &str) -> Result<Option<Account>, StoreError>;

    async fn save(&self, account: &Account) -> Result<(), StoreError>;

    /// Returns `true` if the account existed.
    async fn delete(&self, name: &str) -> Result<bool, StoreError>;

    async fn list(&self) -> Result<Vec<String>, StoreError>;
}
