//! Core data models for the Leave Policy Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod balance;
mod employee;
mod leave_configuration;
mod policy;
mod request;
mod verdict;

pub use balance::{
    BalanceKpis, EmployeeBalanceSummary, LeaveBalance, LeaveTypeBalance, PresentationBalance,
};
pub use employee::{EmployeeId, EmployeeProfile, EmployeeType, Gender, MaritalStatus, ScopeId};
pub use leave_configuration::{
    Applicability, ConfigurationCarrier, ConfigurationPatch, LeaveCategory, LeaveConfiguration,
    LeaveUnit, PolicyFlags,
};
pub use policy::{
    CalendarConfiguration, CreditFrequency, CreditPolicy, ExpireFrequency, ExpirePolicy,
    MAX_DAYS_IN_YEAR, MonetizationPolicy, PeriodType, ProbationRestrictions, Restrictions,
};
pub use request::{BookedLeave, CreditRequest, LeaveRequest, PartialDaySelection};
pub use verdict::{AcceptedCredit, AcceptedLeave, Rejection, RejectionKind, Verdict};
