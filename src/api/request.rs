//! Request types for the Leave Policy Engine API.
//!
//! Configuration bodies reuse the model types directly
//! ([`ConfigurationCarrier`](crate::models::ConfigurationCarrier) and
//! [`ConfigurationPatch`](crate::models::ConfigurationPatch)); the types here
//! wrap the remaining operations with the context the engine needs.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    BookedLeave, CreditRequest, EmployeeId, EmployeeProfile, LeaveBalance, LeaveRequest, ScopeId,
};

/// Query string of `GET /configurations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeQuery {
    /// The scope to list.
    pub scope_id: ScopeId,
}

/// Body of `PUT /configurations/:id/employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignEmployeesRequest {
    /// The complete new set of assigned employees.
    pub employee_ids: Vec<EmployeeId>,
}

/// Body of `POST /configurations/:id/copy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyRequest {
    /// Scopes to copy the configuration into.
    pub scopes: Vec<ScopeId>,
}

/// Body of `POST /balances/derive`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeriveBalancesRequest {
    /// Scope whose configurations are derived.
    pub scope_id: ScopeId,
    /// Only derive configurations assigned to this employee.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    /// Ledger counters keyed by leave code.
    #[serde(default)]
    pub ledger: HashMap<String, LeaveBalance>,
}

/// Body of `POST /leave-requests/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveValidationRequest {
    /// Scope in which `request.leave_type_code` is resolved.
    pub scope_id: ScopeId,
    /// The candidate leave request.
    pub request: LeaveRequest,
    /// Ledger for the leave type; an empty ledger when absent.
    #[serde(default)]
    pub balance: Option<LeaveBalance>,
    /// The requesting employee, enabling probation and applicability checks.
    #[serde(default)]
    pub employee: Option<EmployeeProfile>,
    /// Leaves the employee already has booked.
    #[serde(default)]
    pub booked: Vec<BookedLeave>,
    /// Date to validate against, defaulting to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Body of `POST /credit-requests/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditValidationRequest {
    /// Scope in which `request.credit_type` is resolved.
    pub scope_id: ScopeId,
    /// The candidate credit request.
    pub request: CreditRequest,
    /// Date to validate against, defaulting to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}
