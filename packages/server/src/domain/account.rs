use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::solution::{Solution, validate_name};

/// An account and the solutions it owns.
///
/// This is the unit of atomic persistence: the whole document is read,
/// mutated and written back under the account's coordinator lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub name: String,
    #[serde(default)]
    pub solutions: Vec<Solution>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: String, now: DateTime<Utc>) -> Result<Self, DomainError> {
        validate_name("account name", &name)?;
        Ok(Self {
            name,
            solutions: Vec::new(),
            created_at: now,
        })
    }

    pub fn find_solution(&self, name: &str) -> Option<&Solution> {
        self.solutions.iter().find(|s| s.name == name)
    }

    pub fn find_solution_mut(&mut self, name: &str) -> Option<&mut Solution> {
        self.solutions.iter_mut().find(|s| s.name == name)
    }

    /// Add a solution, enforcing per-account name uniqueness (case-sensitive,
    /// exact match). This is the authoritative uniqueness check; the rename
    /// path consults [`Account::has_solution`] too.
    pub fn add_solution(&mut self, solution: Solution) -> Result<(), DomainError> {
        if self.has_solution(&solution.name) {
            return Err(DomainError::DuplicateName(solution.name.clone()));
        }
        self.solutions.push(solution);
        Ok(())
    }

    pub fn has_solution(&self, name: &str) -> bool {
        self.find_solution(name).is_some()
    }

    pub fn remove_solution(&mut self, name: &str) -> Option<Solution> {
        let index = self.solutions.iter().position(|s| s.name == name)?;
        Some(self.solutions.remove(index))
    }
}
