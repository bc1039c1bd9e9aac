use async_trait::async_trait;

use super::error::StorageError;
use super::id::BlobId;

/// Blob storage keyed by opaque [`BlobId`].
///
/// Content is handed over as a whole; uploads are bounded by the store's
/// configured size limit, so buffering them in memory is acceptable.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under the given id, replacing any previous content.
    async fn put(&self, id: &BlobId, data: &[u8]) -> Result<(), StorageError>;

    /// Retrieve all bytes for a blob.
    async fn get(&self, id: &BlobId) -> Result<Vec<u8>, StorageError>;

    /// Check whether a blob exists.
    async fn exists(&self, id: &BlobId) -> Result<bool, StorageError>;

    /// Delete a blob.
    ///
    /// Returns `true` if the blob was deleted, `false` if it did not exist.
    async fn delete(&self, id: &BlobId) -> Result<bool, StorageError>;

    /// Get the size of a blob in bytes.
    async fn size(&self, id: &BlobId) -> Result<u64, StorageError>;
}
