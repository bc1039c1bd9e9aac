use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque correlation handle linking a declared-but-not-yet-uploaded binary
/// file to its eventual content upload.
///
/// Tokens are 36-character hyphenated UUIDs: unique with overwhelming
/// probability across the process lifetime, and not a security credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadToken(String);

impl UploadToken {
    /// Allocate a fresh token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UploadToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
