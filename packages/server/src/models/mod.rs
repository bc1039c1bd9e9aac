pub mod account;
pub mod binary;
pub mod solution;

use serde::Serialize;

/// Outcome of a delete that tears down stored content.
///
/// The delete itself succeeded; `warnings` lists blobs that could not be
/// released and were left for out-of-band cleanup.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DeletionResponse {
    pub warnings: Vec<String>,
}
