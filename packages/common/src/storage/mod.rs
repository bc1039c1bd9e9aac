mod error;
mod filesystem;
mod hash;
mod id;
mod traits;

pub use error::StorageError;
pub use filesystem::FilesystemBlobStore;
pub use hash::ContentHash;
pub use id::BlobId;
pub use traits::BlobStore;
