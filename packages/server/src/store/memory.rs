use async_trait::async_trait;
use dashmap::DashMap;

use super::{AccountStore, StoreError};
use crate::domain::Account;

/// In-memory account store, used by tests and as the no-persistence default.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: DashMap<String, Account>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn load(&self, name: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(name).map(|entry| entry.clone()))
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        self.accounts
            .insert(account.name.clone(), account.clone());
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.accounts.remove(name).is_some())
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<_> = self.accounts.iter().map(|e| e.key().clone()).collect();
        names.sort();
        Ok(names)
    }
}
