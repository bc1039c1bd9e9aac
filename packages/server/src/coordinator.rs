use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::DomainError;

/// Serializes read-modify-write sequences per account.
///
/// An account document is the unit of atomic persistence, so every mutation
/// of it (and of any solution inside it) runs under that account's lock.
/// Operations on different accounts proceed in parallel. Acquisition is
/// bounded: a lock held past the timeout surfaces as [`DomainError::Busy`]
/// instead of a hang.
pub struct MutationCoordinator {
    locks: DashMap<String, Arc<Mutex<()>>>,
    timeout: Duration,
}

impl MutationCoordinator {
    pub fn new(timeout: Duration) -> Self {
        Self {
            locks: DashMap::new(),
            timeout,
        }
    }

    pub async fn acquire(&self, account: &str) -> Result<OwnedMutexGuard<()>, DomainError> {
        let lock = self
            .locks
            .entry(account.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        tokio::time::timeout(self.timeout, lock.lock_owned())
            .await
            .map_err(|_| DomainError::Busy)
    }
}
