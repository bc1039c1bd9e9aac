use thiserror::Error;

/// Typed failure modes for directory, lifecycle and registry operations.
///
/// Every variant maps 1:1 to a transport-level status in the HTTP layer;
/// none of them are used for normal control flow.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("name already in use: {0}")]
    DuplicateName(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("url must not contain whitespace: {0:?}")]
    InvalidUrl(String),

    #[error("solution must be stopped")]
    MustBeStopped,

    #[error("another operation is in progress (state is {0:?})")]
    ConflictingOperation(String),

    #[error("solution is already {0}")]
    AlreadyInState(String),

    #[error("no files supplied")]
    NoFilesSupplied,

    #[error("every file must carry a path")]
    MissingPath,

    #[error("binaries are already registered")]
    AlreadyRegistered,

    #[error("no pending upload for token {0}")]
    TokenNotFound(String),

    #[error("account is busy, retry later")]
    Busy,

    #[error("store failure: {0}")]
    Store(String),
}
