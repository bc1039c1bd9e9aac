use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::DeletionResponse;
use crate::models::solution::{
    CreateSolutionRequest, SetStateRequest, SolutionListResponse, SolutionResponse, StateQuery,
    StateResponse, UpdateSolutionRequest,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/{account}/solutions",
    tag = "Solutions",
    operation_id = "listSolutions",
    summary = "List an account's solutions",
    description = "Returns the account's solutions in stable insertion order.",
    params(("account" = String, Path, description = "Account name")),
    responses(
        (status = 200, description = "Solution list", body = SolutionListResponse),
        (status = 404, description = "Account not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(account))]
pub async fn list_solutions(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Result<Json<SolutionListResponse>, AppError> {
    let solutions = state.directory.list_solutions(&account).await?;
    let total = solutions.len() as u64;
    Ok(Json(SolutionListResponse {
        solutions: solutions.into_iter().map(Into::into).collect(),
        total,
    }))
}

#[utoipa::path(
    post,
    path = "/{account}/solutions",
    tag = "Solutions",
    operation_id = "createSolution",
    summary = "Create a solution",
    description = "Creates a solution in its initial state: STOPPED, with an \
        empty binary registry.",
    params(("account" = String, Path, description = "Account name")),
    request_body = CreateSolutionRequest,
    responses(
        (status = 201, description = "Solution created", body = SolutionResponse),
        (status = 400, description = "Validation error (INVALID_REQUEST, INVALID_URL)", body = ErrorBody),
        (status = 404, description = "Account not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Sibling name taken (DUPLICATE_NAME)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(account, name = %payload.name))]
pub async fn create_solution(
    State(state): State<AppState>,
    Path(account): Path<String>,
    AppJson(payload): AppJson<CreateSolutionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let solution = state
        .directory
        .create_solution(&account, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(SolutionResponse::from(solution))))
}

#[utoipa::path(
    get,
    path = "/{account}/solutions/{name}",
    tag = "Solutions",
    operation_id = "getSolution",
    summary = "Get a solution by name",
    params(
        ("account" = String, Path, description = "Account name"),
        ("name" = String, Path, description = "Solution name"),
    ),
    responses(
        (status = 200, description = "Solution details", body = SolutionResponse),
        (status = 404, description = "Account or solution not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(account, name))]
pub async fn get_solution(
    State(state): State<AppState>,
    Path((account, name)): Path<(String, String)>,
) -> Result<Json<SolutionResponse>, AppError> {
    let solution = state.directory.get_solution(&account, &name).await?;
    Ok(Json(solution.into()))
}

#[utoipa::path(
    patch,
    path = "/{account}/solutions/{name}",
    tag = "Solutions",
    operation_id = "updateSolution",
    summary = "Update a solution",
    description = "Merges the whitelisted patch fields into the solution. \
        Only permitted while the solution is STOPPED; an empty patch and \
        unknown fields are rejected.",
    params(
        ("account" = String, Path, description = "Account name"),
        ("name" = String, Path, description = "Solution name"),
    ),
    request_body = UpdateSolutionRequest,
    responses(
        (status = 200, description = "Solution updated", body = SolutionResponse),
        (status = 400, description = "Validation error (INVALID_REQUEST, INVALID_URL)", body = ErrorBody),
        (status = 404, description = "Account or solution not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Not stopped, or rename collides (MUST_BE_STOPPED, DUPLICATE_NAME)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(account, name))]
pub async fn update_solution(
    State(state): State<AppState>,
    Path((account, name)): Path<(String, String)>,
    AppJson(payload): AppJson<UpdateSolutionRequest>,
) -> Result<Json<SolutionResponse>, AppError> {
    let solution = state
        .directory
        .update_solution(&account, &name, payload.into())
        .await?;
    Ok(Json(solution.into()))
}

#[utoipa::path(
    delete,
    path = "/{account}/solutions/{name}",
    tag = "Solutions",
    operation_id = "deleteSolution",
    summary = "Delete a solution",
    description = "Only permitted while STOPPED. Stored binary content is \
        released best-effort; blobs that could not be deleted are listed as \
        warnings on the (successful) response.",
    params(
        ("account" = String, Path, description = "Account name"),
        ("name" = String, Path, description = "Solution name"),
    ),
    responses(
        (status = 200, description = "Solution deleted", body = DeletionResponse),
        (status = 404, description = "Account or solution not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Solution is started (MUST_BE_STOPPED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(account, name))]
pub async fn delete_solution(
    State(state): State<AppState>,
    Path((account, name)): Path<(String, String)>,
) -> Result<Json<DeletionResponse>, AppError> {
    let warnings = state.directory.delete_solution(&account, &name).await?;
    Ok(Json(DeletionResponse { warnings }))
}

#[utoipa::path(
    get,
    path = "/{account}/solutions/{name}/state",
    tag = "State",
    operation_id = "getState",
    summary = "Get a solution's lifecycle state",
    params(
        ("account" = String, Path, description = "Account name"),
        ("name" = String, Path, description = "Solution name"),
        StateQuery,
    ),
    responses(
        (status = 200, description = "State view", body = StateResponse),
        (status = 404, description = "Account or solution not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(account, name))]
pub async fn get_state(
    State(state): State<AppState>,
    Path((account, name)): Path<(String, String)>,
    Query(query): Query<StateQuery>,
) -> Result<Json<StateResponse>, AppError> {
    let view = state
        .directory
        .get_state(&account, &name, query.verbose.unwrap_or(false))
        .await?;
    Ok(Json(view.into()))
}

#[utoipa::path(
    put,
    path = "/{account}/solutions/{name}/state",
    tag = "State",
    operation_id = "setState",
    summary = "Transition a solution's lifecycle state",
    description = "Atomically transitions between STOPPED and STARTED. \
        Transitioning to the current state fails with ALREADY_IN_STATE; \
        concurrent transitions on one solution are serialized, so exactly \
        one of two racing requests wins.",
    params(
        ("account" = String, Path, description = "Account name"),
        ("name" = String, Path, description = "Solution name"),
    ),
    request_body = SetStateRequest,
    responses(
        (status = 200, description = "State transitioned", body = StateResponse),
        (status = 400, description = "Target is not STOPPED/STARTED (INVALID_REQUEST)", body = ErrorBody),
        (status = 404, description = "Account or solution not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "No-op or occupied state slot (ALREADY_IN_STATE, CONFLICTING_OPERATION)", body = ErrorBody),
        (status = 503, description = "Account lock contended (BUSY)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(account, name, target = %payload.state))]
pub async fn set_state(
    State(state): State<AppState>,
    Path((account, name)): Path<(String, String)>,
    AppJson(payload): AppJson<SetStateRequest>,
) -> Result<Json<StateResponse>, AppError> {
    let view = state
        .directory
        .set_state(&account, &name, &payload.state)
        .await?;
    Ok(Json(view.into()))
}
