use chrono::{DateTime, Utc};
use common::storage::{BlobId, ContentHash};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::token::UploadToken;

/// Aggregate status of a solution's binary registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistryStatus {
    Unavailable,
    Uploading,
    Processing,
    Deployed,
    Failed,
}

/// Status of one binary file within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileStatus {
    Unavailable,
    Uploading,
    Available,
}

/// One uploaded artifact's metadata/content record.
///
/// `path_guid` is present only while the file awaits its content upload;
/// `hash`, `size` and `blob_id` are populated once the content arrives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryFile {
    pub path: String,
    pub path_guid: Option<UploadToken>,
    pub size: u64,
    pub status: FileStatus,
    pub hash: Option<ContentHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_id: Option<BlobId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BinaryFile {
    fn new(path: String, now: DateTime<Utc>) -> Self {
        Self {
            path,
            path_guid: Some(UploadToken::generate()),
            size: 0,
            status: FileStatus::Unavailable,
            hash: None,
            blob_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A file entry as declared by a registration request, before validation.
#[derive(Debug, Clone)]
pub struct RequestedFile {
    pub path: Option<String>,
}

/// Registration intent: first declaration versus wholesale replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterMode {
    /// First registration; fails if the registry already has files.
    Create,
    /// Subsequent registration; discards entries not re-declared.
    Replace,
}

/// The ordered collection of binary files for one solution, plus aggregate
/// status and the declared (informational) byte total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryRegistry {
    pub total_size: u64,
    pub status: RegistryStatus,
    #[serde(default)]
    pub files: Vec<BinaryFile>,
}

impl Default for BinaryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryRegistry {
    pub fn new() -> Self {
        Self {
            total_size: 0,
            status: RegistryStatus::Unavailable,
            files: Vec::new(),
        }
    }

    /// Declare the registry's file set and hand out fresh upload tokens.
    ///
    /// Paths already present keep their entry (metadata and stored content
    /// survive until re-uploaded) but get a fresh token. In replace mode,
    /// entries not re-declared are dropped; their blob ids are returned so
    /// the caller can release the stored content.
    pub fn register(
        &mut self,
        mode: RegisterMode,
        requested: Vec<RequestedFile>,
        declared_total: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<Vec<BlobId>, DomainError> {
        if requested.is_empty() {
            return Err(DomainError::NoFilesSupplied);
        }
        let mut paths = Vec::with_capacity(requested.len());
        for file in requested {
            match file.path {
                Some(path) if !path.trim().is_empty() => paths.push(path),
                _ => return Err(DomainError::MissingPath),
            }
        }
        let mut seen = std::collections::HashSet::new();
        for path in &paths {
            if !seen.insert(path.as_str()) {
                return Err(DomainError::InvalidRequest(format!(
                    "duplicate path in registration: {path:?}"
                )));
            }
        }
        if mode == RegisterMode::Create && !self.files.is_empty() {
            return Err(DomainError::AlreadyRegistered);
        }

        let mut previous = std::mem::take(&mut self.files);
        for path in paths {
            match previous.iter().position(|f| f.path == path) {
                Some(i) => {
                    let mut file = previous.remove(i);
                    file.path_guid = Some(UploadToken::generate());
                    file.updated_at = now;
                    self.files.push(file);
                }
                None => self.files.push(BinaryFile::new(path, now)),
            }
        }

        if let Some(total) = declared_total {
            self.total_size = total;
        }
        self.status = RegistryStatus::Uploading;

        Ok(previous.into_iter().filter_map(|f| f.blob_id).collect())
    }

    /// Whether any file currently holds the given upload token.
    pub fn holds_token(&self, token: &str) -> bool {
        self.files
            .iter()
            .any(|f| f.path_guid.as_ref().is_some_and(|t| t.as_str() == token))
    }

    /// Commit an uploaded content blob to the file holding `token`.
    ///
    /// Returns the updated file and the previous blob id, if any, which the
    /// caller releases best-effort.
    pub fn commit_upload(
        &mut self,
        token: &str,
        size: u64,
        hash: ContentHash,
        blob_id: BlobId,
        now: DateTime<Utc>,
    ) -> Result<(BinaryFile, Option<BlobId>), DomainError> {
        let file = self
            .files
            .iter_mut()
            .find(|f| f.path_guid.as_ref().is_some_and(|t| t.as_str() == token))
            .ok_or_else(|| DomainError::TokenNotFound(token.to_string()))?;

        let previous = file.blob_id.replace(blob_id);
        file.path_guid = None;
        file.status = FileStatus::Available;
        file.size = size;
        file.hash = Some(hash);
        file.updated_at = now;
        let snapshot = file.clone();

        if self.files.iter().all(|f| f.status == FileStatus::Available) {
            self.status = RegistryStatus::Deployed;
        }

        Ok((snapshot, previous))
    }

    /// Blob ids of all stored content, for whole-registry teardown.
    pub fn blob_ids(&self) -> impl Iterator<Item = &BlobId> {
        self.files.iter().filter_map(|f| f.blob_id.as_ref())
    }
}
