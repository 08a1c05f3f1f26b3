//! HTTP API module for the Leave Policy Engine.
//!
//! A thin axum adapter: configuration lifecycle endpoints over the shared
//! [`ConfigurationRegistry`](crate::registry::ConfigurationRegistry), plus
//! balance derivation and request validation over the pure engine.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AssignEmployeesRequest, CopyRequest, CreditValidationRequest, DeriveBalancesRequest,
    LeaveValidationRequest, ScopeQuery,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
