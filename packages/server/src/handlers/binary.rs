use axum::Json;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::domain::RegisterMode;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::binary::{BinaryFileResponse, RegisterBinariesRequest, RegistryResponse};
use crate::state::AppState;

/// Transport-level cap for the raw upload route, slightly above the blob
/// limit so oversized uploads reach the store's structured size check
/// instead of a bare rejection.
pub fn binary_upload_body_limit(max_blob_size: u64) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_blob_size.saturating_add(1024) as usize)
}

#[utoipa::path(
    get,
    path = "/{account}/solutions/{name}/binaries",
    tag = "Binaries",
    operation_id = "getBinaries",
    summary = "Get a solution's binary registry",
    params(
        ("account" = String, Path, description = "Account name"),
        ("name" = String, Path, description = "Solution name"),
    ),
    responses(
        (status = 200, description = "Binary registry", body = RegistryResponse),
        (status = 404, description = "Account or solution not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(account, name))]
pub async fn get_binaries(
    State(state): State<AppState>,
    Path((account, name)): Path<(String, String)>,
) -> Result<Json<RegistryResponse>, AppError> {
    let registry = state.directory.get_binaries(&account, &name).await?;
    Ok(Json(registry.into()))
}

#[utoipa::path(
    post,
    path = "/{account}/solutions/{name}/binaries",
    tag = "Binaries",
    operation_id = "registerBinaries",
    summary = "Register binary files (first declaration)",
    description = "Declares the solution's binary files and hands out one \
        upload token per file. Fails with ALREADY_REGISTERED if the registry \
        already has files; use the replace operation for subsequent \
        registrations.",
    params(
        ("account" = String, Path, description = "Account name"),
        ("name" = String, Path, description = "Solution name"),
    ),
    request_body = RegisterBinariesRequest,
    responses(
        (status = 201, description = "Files registered", body = RegistryResponse),
        (status = 400, description = "Validation error (NO_FILES_SUPPLIED, MISSING_PATH, INVALID_REQUEST)", body = ErrorBody),
        (status = 404, description = "Account or solution not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Registry already populated (ALREADY_REGISTERED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(account, name))]
pub async fn register_binaries(
    State(state): State<AppState>,
    Path((account, name)): Path<(String, String)>,
    AppJson(payload): AppJson<RegisterBinariesRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (files, total_size) = payload.into_requested();
    let registry = state
        .directory
        .register_binaries(&account, &name, RegisterMode::Create, files, total_size)
        .await?;
    Ok((StatusCode::CREATED, Json(RegistryResponse::from(registry))))
}

#[utoipa::path(
    put,
    path = "/{account}/solutions/{name}/binaries",
    tag = "Binaries",
    operation_id = "replaceBinaries",
    summary = "Replace the registered binary files",
    description = "Wholesale replacement of the registry's file list. Paths \
        that are re-declared keep their entry (and stored content, until \
        re-uploaded) but get a fresh upload token; entries not re-declared \
        are dropped and their stored content released.",
    params(
        ("account" = String, Path, description = "Account name"),
        ("name" = String, Path, description = "Solution name"),
    ),
    request_body = RegisterBinariesRequest,
    responses(
        (status = 200, description = "Files replaced", body = RegistryResponse),
        (status = 400, description = "Validation error (NO_FILES_SUPPLIED, MISSING_PATH, INVALID_REQUEST)", body = ErrorBody),
        (status = 404, description = "Account or solution not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(account, name))]
pub async fn replace_binaries(
    State(state): State<AppState>,
    Path((account, name)): Path<(String, String)>,
    AppJson(payload): AppJson<RegisterBinariesRequest>,
) -> Result<Json<RegistryResponse>, AppError> {
    let (files, total_size) = payload.into_requested();
    let registry = state
        .directory
        .register_binaries(&account, &name, RegisterMode::Replace, files, total_size)
        .await?;
    Ok(Json(registry.into()))
}

#[utoipa::path(
    put,
    path = "/{account}/solutions/{name}/binaries/{token}",
    tag = "Binaries",
    operation_id = "uploadBinaryContent",
    summary = "Upload binary content by token",
    description = "Uploads the raw content bytes for the pending file \
        correlated by the upload token. On success the file becomes \
        AVAILABLE, its token is consumed, and hash/size are populated from \
        the content. A previously stored blob for the file is released \
        best-effort.",
    params(
        ("account" = String, Path, description = "Account name"),
        ("name" = String, Path, description = "Solution name"),
        ("token" = String, Path, description = "Upload token from registration"),
    ),
    request_body(content_type = "application/octet-stream", description = "Raw content bytes"),
    responses(
        (status = 200, description = "Content uploaded", body = BinaryFileResponse),
        (status = 400, description = "Content exceeds size limit (INVALID_REQUEST)", body = ErrorBody),
        (status = 404, description = "No pending upload for token (TOKEN_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, content), fields(account, name, token, bytes = content.len()))]
pub async fn upload_binary(
    State(state): State<AppState>,
    Path((account, name, token)): Path<(String, String, String)>,
    content: Bytes,
) -> Result<Json<BinaryFileResponse>, AppError> {
    let file = state
        .directory
        .upload_binary(&account, &name, &token, &content)
        .await?;
    Ok(Json(file.into()))
}
