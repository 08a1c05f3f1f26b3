//! Calculation logic for the Leave Policy Engine.
//!
//! This module contains the pure functions of the engine: deriving policy
//! flags from a leave category, counting leave days around weekends and
//! holidays, turning raw ledgers into presentation balances and KPIs, and
//! validating leave and credit requests.

mod balance_derivation;
mod credit_validation;
mod day_detection;
mod flags;
mod leave_validation;
mod request_checks;

pub use balance_derivation::{
    DISPLAY_DECIMAL_PLACES, aggregate_kpis, check_ledger, derive_balance,
    derive_employee_balances, round_display,
};
pub use credit_validation::validate_credit_request;
pub use day_detection::{DayType, count_leave_days, get_day_type, span_days};
pub use flags::derive_flags;
pub use leave_validation::validate_leave_request;
pub use request_checks::ValidationContext;
