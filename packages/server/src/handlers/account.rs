use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::DeletionResponse;
use crate::models::account::{AccountResponse, CreateAccountRequest};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Accounts",
    operation_id = "createAccount",
    summary = "Create a new account",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Validation error (INVALID_REQUEST)", body = ErrorBody),
        (status = 409, description = "Name already in use (DUPLICATE_NAME)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_account(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.directory.create_account(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

#[utoipa::path(
    get,
    path = "/{account}",
    tag = "Accounts",
    operation_id = "getAccount",
    summary = "Get an account and its solutions",
    params(("account" = String, Path, description = "Account name")),
    responses(
        (status = 200, description = "Account details", body = AccountResponse),
        (status = 404, description = "Account not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(account))]
pub async fn get_account(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = state.directory.find_account(&account).await?;
    Ok(Json(account.into()))
}

#[utoipa::path(
    delete,
    path = "/{account}",
    tag = "Accounts",
    operation_id = "deleteAccount",
    summary = "Delete an account wholesale",
    description = "Deletes the account and every solution it owns. Stored \
        binary content is released best-effort; blobs that could not be \
        deleted are listed as warnings.",
    params(("account" = String, Path, description = "Account name")),
    responses(
        (status = 200, description = "Account deleted", body = DeletionResponse),
        (status = 404, description = "Account not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(account))]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Result<Json<DeletionResponse>, AppError> {
    let warnings = state.directory.delete_account(&account).await?;
    Ok(Json(DeletionResponse { warnings }))
}
