//! Employee identity and profile types.
//!
//! This module defines the identifiers and the employee attributes that leave
//! configurations use for applicability and probation checks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an employee, as issued by the HR backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    /// Creates a new employee id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an organizational scope (company or tenant).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeId(pub String);

impl ScopeId {
    /// Creates a new scope id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Gender as recorded on the employee profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Any other gender.
    Other,
}

/// Marital status as recorded on the employee profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    /// Single.
    Single,
    /// Married.
    Married,
}

/// The type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeType {
    /// Full-time permanent employment.
    FullTime,
    /// Part-time permanent employment.
    PartTime,
    /// Fixed-term contract.
    Contract,
    /// Intern or trainee.
    Intern,
}

/// The employee attributes the engine needs when validating a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// The employee's id.
    pub id: EmployeeId,
    /// The employee's gender.
    pub gender: Gender,
    /// The employee's marital status.
    pub marital_status: MaritalStatus,
    /// The employee's employment type.
    pub employee_type: EmployeeType,
    /// Whether the employee is still within their probation period.
    #[serde(default)]
    pub on_probation: bool,
}
