use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::storage::{BlobId, BlobStore, ContentHash, StorageError};
use tracing::warn;

use crate::coordinator::MutationCoordinator;
use crate::domain::{
    Account, BinaryFile, BinaryRegistry, DomainError, LifecycleState, RegisterMode, RequestedFile,
    Solution, SolutionPatch, StateView,
};
use crate::store::AccountStore;

/// Fields accepted when creating a solution.
#[derive(Debug, Clone)]
pub struct NewSolution {
    pub name: String,
    pub url: String,
    pub runtime_name: Option<String>,
    pub runtime_version: Option<String>,
    pub runtime_arguments: Vec<crate::domain::RuntimeArgument>,
}

/// The account directory: resolves accounts, locates solutions inside them,
/// and applies every mutation as an atomic load-mutate-save of the owning
/// account document under the coordinator's per-account lock.
pub struct AccountDirectory {
    store: Arc<dyn AccountStore>,
    blobs: Arc<dyn BlobStore>,
    coordinator: MutationCoordinator,
}

impl AccountDirectory {
    pub fn new(
        store: Arc<dyn AccountStore>,
        blobs: Arc<dyn BlobStore>,
        lock_timeout: Duration,
    ) -> Self {
        Self {
            store,
            blobs,
            coordinator: MutationCoordinator::new(lock_timeout),
        }
    }

    pub async fn create_account(&self, name: &str) -> Result<Account, DomainError> {
        let account = Account::new(name.to_string(), Utc::now())?;
        let _guard = self.coordinator.acquire(name).await?;

        if self.store.load(name).await.map_err(store_err)?.is_some() {
            return Err(DomainError::DuplicateName(name.to_string()));
        }
        self.store.save(&account).await.map_err(store_err)?;
        Ok(account)
    }

    pub async fn find_account(&self, name: &str) -> Result<Account, DomainError> {
        self.load_required(name).await
    }

    /// Delete an account wholesale, releasing the stored content of every
    /// solution it owns. Blob deletion is best-effort per file; failures are
    /// logged and reported as warnings, never as a failed delete.
    pub async fn delete_account(&self, name: &str) -> Result<Vec<String>, DomainError> {
        let _guard = self.coordinator.acquire(name).await?;

        let account = self.load_required(name).await?;
        self.store.delete(name).await.map_err(store_err)?;

        let blob_ids: Vec<BlobId> = account
            .solutions
            .iter()
            .flat_map(|s| s.binaries.blob_ids().cloned())
            .collect();
        Ok(self.release_blobs(blob_ids).await)
    }

    pub async fn list_solutions(&self, account: &str) -> Result<Vec<Solution>, DomainError> {
        Ok(self.load_required(account).await?.solutions)
    }

    pub async fn create_solution(
        &self,
        account: &str,
        new: NewSolution,
    ) -> Result<Solution, DomainError> {
        let mut solution = Solution::new(new.name, new.url, Utc::now())?;
        solution.runtime_name = new.runtime_name;
        solution.runtime_version = new.runtime_version;
        solution.runtime_arguments = new.runtime_arguments;

        let _guard = self.coordinator.acquire(account).await?;

        let mut doc = self.load_required(account).await?;
        doc.add_solution(solution.clone())?;
        self.store.save(&doc).await.map_err(store_err)?;
        Ok(solution)
    }

    pub async fn get_solution(&self, account: &str, name: &str) -> Result<Solution, DomainError> {
        let doc = self.load_required(account).await?;
        find_solution(&doc, name).cloned()
    }

    pub async fn update_solution(
        &self,
        account: &str,
        name: &str,
        patch: SolutionPatch,
    ) -> Result<Solution, DomainError> {
        let _guard = self.coordinator.acquire(account).await?;

        let mut doc = self.load_required(account).await?;
        if let Some(new_name) = patch.name.as_deref()
            && new_name != name
            && doc.has_solution(new_name)
        {
            return Err(DomainError::DuplicateName(new_name.to_string()));
        }

        let solution = find_solution_mut(&mut doc, name)?;
        solution.apply_patch(patch, Utc::now())?;
        let updated = solution.clone();

        self.store.save(&doc).await.map_err(store_err)?;
        Ok(updated)
    }

    /// Delete a solution. Only permitted while stopped; the solution is
    /// removed first, then its stored content is released best-effort, each
    /// failure collected into the returned warning list.
    pub async fn delete_solution(
        &self,
        account: &str,
        name: &str,
    ) -> Result<Vec<String>, DomainError> {
        let _guard = self.coordinator.acquire(account).await?;

        let mut doc = self.load_required(account).await?;
        find_solution(&doc, name)?.ensure_stopped()?;

        let removed = doc
            .remove_solution(name)
            .unwrap_or_else(|| unreachable!("solution existed under lock"));
        self.store.save(&doc).await.map_err(store_err)?;

        let blob_ids: Vec<BlobId> = removed.binaries.blob_ids().cloned().collect();
        Ok(self.release_blobs(blob_ids).await)
    }

    pub async fn get_state(
        &self,
        account: &str,
        name: &str,
        verbose: bool,
    ) -> Result<StateView, DomainError> {
        let doc = self.load_required(account).await?;
        Ok(find_solution(&doc, name)?.state_view(verbose))
    }

    pub async fn set_state(
        &self,
        account: &str,
        name: &str,
        requested: &str,
    ) -> Result<StateView, DomainError> {
        let target = LifecycleState::parse_request(requested)?;
        let _guard = self.coordinator.acquire(account).await?;

        let mut doc = self.load_required(account).await?;
        let solution = find_solution_mut(&mut doc, name)?;
        solution.set_state(target, Utc::now())?;
        let view = solution.state_view(false);

        self.store.save(&doc).await.map_err(store_err)?;
        Ok(view)
    }

    pub async fn get_binaries(
        &self,
        account: &str,
        name: &str,
    ) -> Result<BinaryRegistry, DomainError> {
        let doc = self.load_required(account).await?;
        Ok(find_solution(&doc, name)?.binaries.clone())
    }

    pub async fn register_binaries(
        &self,
        account: &str,
        name: &str,
        mode: RegisterMode,
        files: Vec<RequestedFile>,
        declared_total: Option<u64>,
    ) -> Result<BinaryRegistry, DomainError> {
        let _guard = self.coordinator.acquire(account).await?;

        let mut doc = self.load_required(account).await?;
        let solution = find_solution_mut(&mut doc, name)?;
        let orphaned = solution
            .binaries
            .register(mode, files, declared_total, Utc::now())?;
        solution.updated_at = Utc::now();
        let registry = solution.binaries.clone();

        self.store.save(&doc).await.map_err(store_err)?;

        // Content of files dropped by a replace is no longer referenced.
        self.release_blobs(orphaned).await;
        Ok(registry)
    }

    pub async fn upload_binary(
        &self,
        account: &str,
        name: &str,
        token: &str,
        content: &[u8],
    ) -> Result<BinaryFile, DomainError> {
        let _guard = self.coordinator.acquire(account).await?;

        let mut doc = self.load_required(account).await?;
        let solution = find_solution_mut(&mut doc, name)?;
        if !solution.binaries.holds_token(token) {
            return Err(DomainError::TokenNotFound(token.to_string()));
        }

        // Write the blob before touching the document: if the put fails the
        // registry still points at the previous content.
        let blob_id = BlobId::generate();
        let hash = ContentHash::compute(content);
        self.blobs.put(&blob_id, content).await.map_err(blob_err)?;

        let (file, previous) = solution.binaries.commit_upload(
            token,
            content.len() as u64,
            hash,
            blob_id,
            Utc::now(),
        )?;
        solution.updated_at = Utc::now();

        self.store.save(&doc).await.map_err(store_err)?;

        if let Some(previous) = previous {
            self.release_blobs(vec![previous]).await;
        }
        Ok(file)
    }

    async fn load_required(&self, name: &str) -> Result<Account, DomainError> {
        self.store
            .load(name)
            .await
            .map_err(store_err)?
            .ok_or_else(|| DomainError::NotFound(format!("account {name:?}")))
    }

    /// Best-effort blob deletion; failures are logged and returned as
    /// warnings but never fail the surrounding operation.
    async fn release_blobs(&self, ids: Vec<BlobId>) -> Vec<String> {
        let mut warnings = Vec::new();
        for id in ids {
            if let Err(e) = self.blobs.delete(&id).await {
                warn!(blob = %id, error = %e, "failed to delete blob");
                warnings.push(format!("failed to delete blob {id}: {e}"));
            }
        }
        warnings
    }
}

fn find_solution<'a>(account: &'a Account, name: &str) -> Result<&'a Solution, DomainError> {
    account
        .find_solution(name)
        .ok_or_else(|| DomainError::NotFound(format!("solution {name:?}")))
}

fn find_solution_mut<'a>(
    account: &'a mut Account,
    name: &str,
) -> Result<&'a mut Solution, DomainError> {
    account
        .find_solution_mut(name)
        .ok_or_else(|| DomainError::NotFound(format!("solution {name:?}")))
}

fn store_err(err: crate::store::StoreError) -> DomainError {
    DomainError::Store(err.to_string())
}

fn blob_err(err: StorageError) -> DomainError {
    match err {
        StorageError::SizeLimitExceeded { actual, limit } => DomainError::InvalidRequest(format!(
            "content exceeds size limit ({actual} > {limit} bytes)"
        )),
        other => DomainError::Store(other.to_string()),
    }
}
