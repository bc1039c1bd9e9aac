use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BinaryFile, BinaryRegistry, FileStatus, RegistryStatus, RequestedFile};

/// One declared file in a registration request.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFileSpec {
    /// Path of the binary within the solution, e.g. `lib/p1.zip`.
    #[schema(example = "p1.zip")]
    pub path: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBinariesRequest {
    #[serde(default)]
    pub files: Vec<RegisterFileSpec>,
    /// Declared byte total across all files (informational).
    pub total_size: Option<u64>,
}

impl RegisterBinariesRequest {
    pub fn into_requested(self) -> (Vec<RequestedFile>, Option<u64>) {
        let files = self
            .files
            .into_iter()
            .map(|f| RequestedFile { path: f.path })
            .collect();
        (files, self.total_size)
    }
}

/// Response DTO for one binary file record.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BinaryFileResponse {
    #[schema(example = "p1.zip")]
    pub path: String,
    /// Upload token; present only while the file awaits content.
    #[schema(example = "0192f3a8-9c1d-4f6e-8a2b-7d5c3e1f0a9b")]
    pub path_guid: Option<String>,
    pub size: u64,
    pub status: FileStatus,
    /// SHA-256 content hash; null until the content is uploaded.
    pub hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BinaryFile> for BinaryFileResponse {
    fn from(file: BinaryFile) -> Self {
        Self {
            path: file.path,
            path_guid: file.path_guid.map(|t| t.as_str().to_string()),
            size: file.size,
            status: file.status,
            hash: file.hash.map(|h| h.to_hex()),
            created_at: file.created_at,
            updated_at: file.updated_at,
        }
    }
}

/// Response DTO for a solution's binary registry.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistryResponse {
    pub total_size: u64,
    pub status: RegistryStatus,
    pub files: Vec<BinaryFileResponse>,
}

impl From<BinaryRegistry> for RegistryResponse {
    fn from(registry: BinaryRegistry) -> Self {
        Self {
            total_size: registry.total_size,
            status: registry.status,
            files: registry.files.into_iter().map(Into::into).collect(),
        }
    }
}
