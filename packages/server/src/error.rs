use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::DomainError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `NOT_FOUND`, `DUPLICATE_NAME`,
    /// `INVALID_REQUEST`, `INVALID_URL`, `MUST_BE_STOPPED`,
    /// `CONFLICTING_OPERATION`, `ALREADY_IN_STATE`, `NO_FILES_SUPPLIED`,
    /// `MISSING_PATH`, `ALREADY_REGISTERED`, `TOKEN_NOT_FOUND`, `BUSY`,
    /// `STORE_FAILURE`.
    #[schema(example = "MUST_BE_STOPPED")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "solution must be stopped")]
    pub message: String,
}

/// Application-level error type: every domain failure mapped to a transport
/// status, plus the seconds-until-retry hint for `Busy`.
#[derive(Debug)]
pub struct AppError {
    inner: DomainError,
}

/// Seconds suggested to clients before retrying a `Busy` response.
const BUSY_RETRY_AFTER: u64 = 1;

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        let message = self.inner.to_string();
        let (status, code) = match &self.inner {
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            DomainError::TokenNotFound(_) => (StatusCode::NOT_FOUND, "TOKEN_NOT_FOUND"),
            DomainError::DuplicateName(_) => (StatusCode::CONFLICT, "DUPLICATE_NAME"),
            DomainError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            DomainError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "INVALID_URL"),
            DomainError::MustBeStopped => (StatusCode::CONFLICT, "MUST_BE_STOPPED"),
            DomainError::ConflictingOperation(_) => {
                (StatusCode::CONFLICT, "CONFLICTING_OPERATION")
            }
            DomainError::AlreadyInState(_) => (StatusCode::CONFLICT, "ALREADY_IN_STATE"),
            DomainError::NoFilesSupplied => (StatusCode::BAD_REQUEST, "NO_FILES_SUPPLIED"),
            DomainError::MissingPath => (StatusCode::BAD_REQUEST, "MISSING_PATH"),
            DomainError::AlreadyRegistered => (StatusCode::CONFLICT, "ALREADY_REGISTERED"),
            DomainError::Busy => (StatusCode::SERVICE_UNAVAILABLE, "BUSY"),
            DomainError::Store(detail) => {
                tracing::error!("store failure: {}", detail);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "STORE_FAILURE",
                        message: "A backing store error occurred".into(),
                    },
                );
            }
        };
        (status, ErrorBody { code, message })
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        DomainError::InvalidRequest(message.into()).into()
    }
}

impl From<DomainError> for AppError {
    fn from(inner: DomainError) -> Self {
        Self { inner }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let busy = matches!(self.inner, DomainError::Busy);
        let (status, body) = self.status_and_body();

        if busy {
            (
                status,
                [("Retry-After", BUSY_RETRY_AFTER.to_string())],
                Json(body),
            )
                .into_response()
        } else {
            (status, Json(body)).into_response()
        }
    }
}
