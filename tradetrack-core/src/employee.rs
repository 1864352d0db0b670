//! Employee records and the public views built from them.

use crate::vector::{Embedding, EmployeeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access role of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[default]
    Employee,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("Admin"),
            Role::Employee => f.write_str("Employee"),
        }
    }
}

/// A stored employee. The embedding is kept L2-normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub name: String,
    pub embedding: Embedding,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn view(&self) -> EmployeeView {
        EmployeeView {
            employee_id: self.employee_id.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// Registration input as received from the caller; the embedding is raw.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewEmployee {
    pub employee_id: EmployeeId,
    pub name: String,
    pub embedding: Embedding,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Validated payload handed to [`crate::storage::EmployeeDirectory::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub employee_id: EmployeeId,
    pub name: String,
    pub embedding: Embedding,
    pub role: Role,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub embedding: Option<Embedding>,
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.role.is_none() && self.embedding.is_none()
    }
}

/// Public view of an employee. Never carries the embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeView {
    pub employee_id: EmployeeId,
    pub name: String,
    pub role: Role,
}

/// Result of a best-match lookup. Built per call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub employee_id: EmployeeId,
    pub name: String,
    pub role: Role,
    pub score: f64,
}

impl MatchResult {
    pub fn new(employee: &Employee, score: f64) -> Self {
        MatchResult {
            employee_id: employee.employee_id.clone(),
            name: employee.name.clone(),
            role: employee.role,
            score,
        }
    }
}
