//! Error types for the Leave Policy Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error that crosses the public boundary of the engine.
//!
//! Request-level problems (a malformed leave request, a request that breaks a
//! restriction) are *not* errors: they are reported as
//! [`Rejection`](crate::models::Rejection)s inside a
//! [`Verdict`](crate::models::Verdict). The variants here cover settings
//! loading, configuration invariants, registry lookups and caller misuse.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A problem with a single named field.
///
/// Used both for configuration invariant failures and for request rejections,
/// so that callers can highlight the offending input directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path of the field (e.g. `credit_policy.custom_dates`).
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns a copy of this error with `prefix.` prepended to the field path.
    pub fn nested(self, prefix: &str) -> Self {
        Self {
            field: format!("{}.{}", prefix, self.field),
            message: self.message,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Joins field errors into one line for error display.
fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The main error type for the Leave Policy Engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Settings file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Settings file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A leave configuration was rejected before being stored.
    ///
    /// Nothing is applied when this is returned.
    #[error("Leave configuration rejected: {}", join_field_errors(.errors))]
    ConfigurationInvariant {
        /// Every field that failed validation.
        errors: Vec<FieldError>,
    },

    /// No leave configuration exists with the given id.
    #[error("Leave configuration not found: {id}")]
    ConfigurationNotFound {
        /// The id that was looked up.
        id: Uuid,
    },

    /// The configuration still has employees assigned and cannot be deleted.
    #[error("Leave configuration {id} is assigned to {assigned} employee(s)")]
    ConfigurationInUse {
        /// The configuration id.
        id: Uuid,
        /// Number of employees still assigned.
        assigned: usize,
    },

    /// The caller passed data that is inconsistent with its own shape,
    /// such as a ledger whose category differs from its configuration.
    ///
    /// This signals an integration bug upstream, not a business outcome.
    #[error("Contract violation: {message}")]
    ContractViolation {
        /// A description of the misuse.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::ConfigurationInvariant`] for a single field.
    pub fn invariant(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::ConfigurationInvariant {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Builds a [`EngineError::ContractViolation`].
    pub fn contract(message: impl Into<String>) -> Self {
        EngineError::ContractViolation {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_configuration_invariant_lists_every_field() {
        let error = EngineError::ConfigurationInvariant {
            errors: vec![
                FieldError::new("code", "must not be empty"),
                FieldError::new("credit_policy", "is required for accrued leave"),
            ],
        };
        assert_eq!(
            error.to_string(),
            "Leave configuration rejected: code: must not be empty; credit_policy: is required for accrued leave"
        );
    }

    #[test]
    fn test_configuration_in_use_displays_count() {
        let id = Uuid::nil();
        let error = EngineError::ConfigurationInUse { id, assigned: 3 };
        assert_eq!(
            error.to_string(),
            format!("Leave configuration {} is assigned to 3 employee(s)", id)
        );
    }

    #[test]
    fn test_contract_violation_displays_message() {
        let error = EngineError::contract("ledger category flexible does not match accrued");
        assert_eq!(
            error.to_string(),
            "Contract violation: ledger category flexible does not match accrued"
        );
    }

    #[test]
    fn test_field_error_nested_prefixes_path() {
        let error = FieldError::new("custom_dates", "required").nested("expire_policy");
        assert_eq!(error.field, "expire_policy.custom_dates");
        assert_eq!(error.to_string(), "expire_policy.custom_dates: required");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigurationNotFound { id: Uuid::nil() })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
