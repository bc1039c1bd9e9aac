use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Account;
use crate::models::solution::SolutionResponse;

#[derive(Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Account name; becomes the document key.
    #[schema(example = "123")]
    pub name: String,
}

/// Response DTO for an account and the solutions it owns.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub name: String,
    pub solutions: Vec<SolutionResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            name: account.name,
            solutions: account.solutions.into_iter().map(Into::into).collect(),
            created_at: account.created_at,
        }
    }
}
