use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::directory::NewSolution;
use crate::domain::{RuntimeArgument, Solution, SolutionPatch, StateView};
use crate::models::binary::RegistryResponse;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSolutionRequest {
    /// Solution name, unique within the account.
    #[schema(example = "s1")]
    pub name: String,
    /// Deployment url; must not contain whitespace.
    #[schema(example = "/s1")]
    pub url: String,
    #[schema(example = "node")]
    pub runtime_name: Option<String>,
    #[schema(example = "22")]
    pub runtime_version: Option<String>,
    pub runtime_arguments: Option<Vec<RuntimeArgument>>,
}

impl From<CreateSolutionRequest> for NewSolution {
    fn from(req: CreateSolutionRequest) -> Self {
        Self {
            name: req.name,
            url: req.url,
            runtime_name: req.runtime_name,
            runtime_version: req.runtime_version,
            runtime_arguments: req.runtime_arguments.unwrap_or_default(),
        }
    }
}

/// Whitelisted PATCH fields; anything else is rejected as INVALID_REQUEST.
#[derive(Deserialize, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSolutionRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    pub runtime_name: Option<String>,
    pub runtime_version: Option<String>,
    pub runtime_arguments: Option<Vec<RuntimeArgument>>,
}

impl From<UpdateSolutionRequest> for SolutionPatch {
    fn from(req: UpdateSolutionRequest) -> Self {
        Self {
            name: req.name,
            url: req.url,
            runtime_name: req.runtime_name,
            runtime_version: req.runtime_version,
            runtime_arguments: req.runtime_arguments,
        }
    }
}

/// Response DTO for a single solution.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolutionResponse {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_version: Option<String>,
    pub runtime_arguments: Vec<RuntimeArgument>,
    /// Lifecycle state: `STOPPED` or `STARTED`.
    #[schema(example = "STOPPED")]
    pub state: String,
    pub binaries: RegistryResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Solution> for SolutionResponse {
    fn from(solution: Solution) -> Self {
        Self {
            name: solution.name,
            url: solution.url,
            runtime_name: solution.runtime_name,
            runtime_version: solution.runtime_version,
            runtime_arguments: solution.runtime_arguments,
            state: solution.state.as_str().to_string(),
            binaries: solution.binaries.into(),
            created_at: solution.created_at,
            updated_at: solution.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SolutionListResponse {
    pub solutions: Vec<SolutionResponse>,
    pub total: u64,
}

#[derive(Deserialize, IntoParams)]
pub struct StateQuery {
    /// Include orchestration placeholders (`urls`, `processes`) in the view.
    pub verbose: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
pub struct SetStateRequest {
    /// Requested target state; must be exactly `STOPPED` or `STARTED`.
    #[schema(example = "STARTED")]
    pub state: String,
}

/// Public state view. `urls` and `processes` appear only in the verbose
/// view and are always iterable (possibly empty), never null.
#[derive(Serialize, ToSchema)]
pub struct StateResponse {
    #[schema(example = "STARTED")]
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processes: Option<Vec<String>>,
}

impl From<StateView> for StateResponse {
    fn from(view: StateView) -> Self {
        Self {
            state: view.state.as_str().to_string(),
            urls: view.urls,
            processes: view.processes,
        }
    }
}
