use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::binary::BinaryRegistry;
use super::error::DomainError;

/// Lifecycle state slot of a solution.
///
/// Only `STOPPED` and `STARTED` are reachable through the public transition
/// operation. `Other` preserves unrecognized values found in persisted
/// documents (older revisions reserved the slot for intermediate states);
/// any transition attempted while the slot holds such a value fails with
/// [`DomainError::ConflictingOperation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LifecycleState {
    Stopped,
    Started,
    Other(String),
}

impl LifecycleState {
    /// Strictly parse a requested target state.
    ///
    /// Unlike the serde conversion, which must round-trip whatever a stored
    /// document contains, a transition request may only name the two public
    /// states.
    pub fn parse_request(s: &str) -> Result<Self, DomainError> {
        match s {
            "STOPPED" => Ok(Self::Stopped),
            "STARTED" => Ok(Self::Started),
            other => Err(DomainError::InvalidRequest(format!(
                "state must be STOPPED or STARTED, got {other:?}"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Stopped => "STOPPED",
            Self::Started => "STARTED",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for LifecycleState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "STOPPED" => Self::Stopped,
            "STARTED" => Self::Started,
            _ => Self::Other(s),
        }
    }
}

impl From<LifecycleState> for String {
    fn from(state: LifecycleState) -> Self {
        state.as_str().to_string()
    }
}

/// One key-value runtime argument passed to the solution's runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RuntimeArgument {
    pub key: String,
    pub value: String,
}

/// Public view of a solution's lifecycle state.
///
/// `urls` and `processes` are orchestration placeholders: present (possibly
/// empty) whenever the verbose view is requested, so clients can iterate
/// them without null checks.
#[derive(Debug, Clone)]
pub struct StateView {
    pub state: LifecycleState,
    pub urls: Option<Vec<String>>,
    pub processes: Option<Vec<String>>,
}

/// Typed whitelist of fields mutable through the update operation.
///
/// Anything outside this set is rejected as an invalid request at the
/// transport boundary rather than silently merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionPatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub runtime_name: Option<String>,
    pub runtime_version: Option<String>,
    pub runtime_arguments: Option<Vec<RuntimeArgument>>,
}

impl SolutionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A named deployable unit belonging to an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_version: Option<String>,
    #[serde(default)]
    pub runtime_arguments: Vec<RuntimeArgument>,
    pub state: LifecycleState,
    pub binaries: BinaryRegistry,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Solution {
    /// Create a solution in its initial state: STOPPED, empty registry.
    pub fn new(name: String, url: String, now: DateTime<Utc>) -> Result<Self, DomainError> {
        validate_name("solution name", &name)?;
        validate_url(&url)?;
        Ok(Self {
            name,
            url,
            runtime_name: None,
            runtime_version: None,
            runtime_arguments: Vec::new(),
            state: LifecycleState::Stopped,
            binaries: BinaryRegistry::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Transition to `target`, which the caller has already parsed as one of
    /// the two public states.
    pub fn set_state(
        &mut self,
        target: LifecycleState,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if let LifecycleState::Other(current) = &self.state {
            return Err(DomainError::ConflictingOperation(current.clone()));
        }
        if self.state == target {
            return Err(DomainError::AlreadyInState(target.as_str().to_string()));
        }
        self.state = target;
        self.updated_at = now;
        Ok(())
    }

    pub fn state_view(&self, verbose: bool) -> StateView {
        StateView {
            state: self.state.clone(),
            urls: verbose.then(Vec::new),
            processes: verbose.then(Vec::new),
        }
    }

    /// Merge a patch into the solution. The caller is responsible for
    /// checking sibling-name uniqueness before a rename; everything else is
    /// validated here.
    pub fn apply_patch(
        &mut self,
        patch: SolutionPatch,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if patch.is_empty() {
            return Err(DomainError::InvalidRequest("empty update".into()));
        }
        self.ensure_stopped()?;

        if let Some(name) = patch.name {
            validate_name("solution name", &name)?;
            self.name = name;
        }
        if let Some(url) = patch.url {
            validate_url(&url)?;
            self.url = url;
        }
        if let Some(runtime_name) = patch.runtime_name {
            self.runtime_name = Some(runtime_name);
        }
        if let Some(runtime_version) = patch.runtime_version {
            self.runtime_version = Some(runtime_version);
        }
        if let Some(runtime_arguments) = patch.runtime_arguments {
            self.runtime_arguments = runtime_arguments;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn ensure_stopped(&self) -> Result<(), DomainError> {
        if self.state != LifecycleState::Stopped {
            return Err(DomainError::MustBeStopped);
        }
        Ok(())
    }
}

/// Names become path segments and document keys, so they must be non-empty
/// and free of separators and whitespace.
pub(crate) fn validate_name(label: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::InvalidRequest(format!(
            "{label} must not be empty"
        )));
    }
    if value.contains(['/', '\\']) || value.contains(char::is_whitespace) {
        return Err(DomainError::InvalidRequest(format!(
            "{label} must not contain separators or whitespace: {value:?}"
        )));
    }
    Ok(())
}

fn validate_url(url: &str) -> Result<(), DomainError> {
    if url.is_empty() {
        return Err(DomainError::InvalidRequest("url must not be empty".into()));
    }
    if url.contains(char::is_whitespace) {
        return Err(DomainError::InvalidUrl(url.to_string()));
    }
    Ok(())
}
