//! In-memory store of leave configurations.

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::derive_flags;
use crate::error::{EngineError, EngineResult, FieldError};
use crate::models::{
    ConfigurationCarrier, ConfigurationPatch, EmployeeId, LeaveConfiguration, ScopeId,
};

use super::invariants::validate_carrier;

/// Holds leave configurations and enforces their invariants on every change.
///
/// Every mutation validates the complete resulting configuration first and
/// only then stores it, so a rejected change leaves the registry untouched.
/// Codes are unique within a scope, compared trimmed and case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct ConfigurationRegistry {
    configurations: HashMap<Uuid, LeaveConfiguration>,
}

impl ConfigurationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored configurations.
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Creates a configuration from authored content.
    ///
    /// Flags are derived from the category before validation.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::{
    ///     Applicability, CalendarConfiguration, ConfigurationCarrier, LeaveCategory,
    ///     PolicyFlags, ScopeId,
    /// };
    /// use leave_engine::registry::ConfigurationRegistry;
    ///
    /// let mut registry = ConfigurationRegistry::new();
    /// let created = registry
    ///     .create(ConfigurationCarrier {
    ///         scope_id: ScopeId::new("acme"),
    ///         name: "Work From Home".to_string(),
    ///         code: "WFH".to_string(),
    ///         tagline: String::new(),
    ///         description: String::new(),
    ///         category: LeaveCategory::Flexible,
    ///         flags: PolicyFlags::default(),
    ///         credit_policy: None,
    ///         expire_policy: None,
    ///         monetization_policy: None,
    ///         restrictions: None,
    ///         calendar: CalendarConfiguration::default(),
    ///         applicability: Applicability::default(),
    ///     })
    ///     .unwrap();
    /// assert_eq!(registry.get(created.id).unwrap().code(), "WFH");
    /// ```
    pub fn create(&mut self, mut carrier: ConfigurationCarrier) -> EngineResult<LeaveConfiguration> {
        carrier.code = carrier.code.trim().to_string();
        carrier.flags = derive_flags(carrier.category, &carrier.flags);

        let mut errors = validate_carrier(&carrier);
        if self.code_taken(&carrier.scope_id, &carrier.code) {
            errors.push(duplicate_code(&carrier.code, &carrier.scope_id));
        }
        reject_if_invalid(&carrier.code, errors)?;

        let now = Utc::now();
        let configuration = LeaveConfiguration {
            id: Uuid::new_v4(),
            carrier,
            employee_ids: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        };
        info!(
            configuration_id = %configuration.id,
            code = %configuration.code(),
            scope_id = %configuration.carrier.scope_id,
            category = %configuration.category(),
            "Created leave configuration"
        );
        self.configurations
            .insert(configuration.id, configuration.clone());
        Ok(configuration)
    }

    /// Applies a partial update.
    ///
    /// The code cannot change after creation. Flags are re-derived from the
    /// (possibly new) category while every stored policy value is kept.
    pub fn update(
        &mut self,
        id: Uuid,
        patch: ConfigurationPatch,
    ) -> EngineResult<LeaveConfiguration> {
        let existing = self.get(id)?;

        if let Some(code) = &patch.code {
            if code.trim() != existing.code() {
                warn!(
                    configuration_id = %id,
                    code = %existing.code(),
                    requested = %code,
                    "Rejected code change"
                );
                return Err(EngineError::invariant(
                    "code",
                    format!(
                        "code is immutable after creation, '{}' cannot become '{}'",
                        existing.code(),
                        code.trim()
                    ),
                ));
            }
        }

        let mut carrier = existing.carrier.clone();
        patch.apply_to(&mut carrier);
        carrier.flags = derive_flags(carrier.category, &carrier.flags);
        reject_if_invalid(&carrier.code, validate_carrier(&carrier))?;

        let configuration = self
            .configurations
            .get_mut(&id)
            .ok_or(EngineError::ConfigurationNotFound { id })?;
        configuration.carrier = carrier;
        configuration.updated_at = Utc::now();
        info!(
            configuration_id = %id,
            code = %configuration.code(),
            category = %configuration.category(),
            "Updated leave configuration"
        );
        Ok(configuration.clone())
    }

    /// Replaces the set of employees the configuration is assigned to.
    ///
    /// Assigning the same set again changes nothing, not even `updated_at`.
    pub fn assign_employees<I>(&mut self, id: Uuid, employee_ids: I) -> EngineResult<LeaveConfiguration>
    where
        I: IntoIterator<Item = EmployeeId>,
    {
        let employee_ids: BTreeSet<EmployeeId> = employee_ids.into_iter().collect();
        let configuration = self
            .configurations
            .get_mut(&id)
            .ok_or(EngineError::ConfigurationNotFound { id })?;

        if configuration.employee_ids != employee_ids {
            configuration.employee_ids = employee_ids;
            configuration.updated_at = Utc::now();
            info!(
                configuration_id = %id,
                code = %configuration.code(),
                assigned = configuration.employee_ids.len(),
                "Assigned employees"
            );
        }
        Ok(configuration.clone())
    }

    /// Copies a configuration into other scopes.
    ///
    /// Each copy gets a new id, keeps the code and starts with no employees.
    /// If the code is already taken in any target scope nothing is copied.
    pub fn copy_to(
        &mut self,
        id: Uuid,
        scopes: &[ScopeId],
    ) -> EngineResult<Vec<LeaveConfiguration>> {
        let source = self.get(id)?.clone();

        let mut errors = Vec::new();
        let mut seen = BTreeSet::new();
        for (index, scope) in scopes.iter().enumerate() {
            if !seen.insert(scope) {
                errors.push(FieldError::new(
                    format!("scopes[{}]", index),
                    format!("scope '{}' is listed more than once", scope),
                ));
            } else if self.code_taken(scope, source.code()) {
                errors.push(duplicate_code(source.code(), scope).nested(&format!("scopes[{}]", index)));
            }
        }
        reject_if_invalid(source.code(), errors)?;

        let now = Utc::now();
        let copies: Vec<LeaveConfiguration> = scopes
            .iter()
            .map(|scope| LeaveConfiguration {
                id: Uuid::new_v4(),
                carrier: ConfigurationCarrier {
                    scope_id: scope.clone(),
                    ..source.carrier.clone()
                },
                employee_ids: BTreeSet::new(),
                created_at: now,
                updated_at: now,
            })
            .collect();

        for copy in &copies {
            info!(
                configuration_id = %copy.id,
                source_id = %id,
                code = %copy.code(),
                scope_id = %copy.carrier.scope_id,
                "Copied leave configuration"
            );
            self.configurations.insert(copy.id, copy.clone());
        }
        Ok(copies)
    }

    /// Removes a configuration that has no employees assigned.
    pub fn delete(&mut self, id: Uuid) -> EngineResult<LeaveConfiguration> {
        let assigned = self.get(id)?.employee_ids.len();
        if assigned > 0 {
            warn!(configuration_id = %id, assigned, "Refused to delete assigned configuration");
            return Err(EngineError::ConfigurationInUse { id, assigned });
        }
        let removed = self
            .configurations
            .remove(&id)
            .ok_or(EngineError::ConfigurationNotFound { id })?;
        info!(
            configuration_id = %id,
            code = %removed.code(),
            scope_id = %removed.carrier.scope_id,
            "Deleted leave configuration"
        );
        Ok(removed)
    }

    /// Looks up a configuration by id.
    pub fn get(&self, id: Uuid) -> EngineResult<&LeaveConfiguration> {
        self.configurations
            .get(&id)
            .ok_or(EngineError::ConfigurationNotFound { id })
    }

    /// All configurations of a scope, ordered by code.
    pub fn list_by_scope(&self, scope: &ScopeId) -> Vec<&LeaveConfiguration> {
        let mut configurations: Vec<&LeaveConfiguration> = self
            .configurations
            .values()
            .filter(|c| &c.carrier.scope_id == scope)
            .collect();
        configurations.sort_by(|a, b| a.code().cmp(b.code()));
        configurations
    }

    fn code_taken(&self, scope: &ScopeId, code: &str) -> bool {
        let code = code.trim();
        self.configurations
            .values()
            .any(|c| &c.carrier.scope_id == scope && c.code().trim().eq_ignore_ascii_case(code))
    }
}

fn duplicate_code(code: &str, scope: &ScopeId) -> FieldError {
    FieldError::new(
        "code",
        format!("code '{}' is already used in scope '{}'", code, scope),
    )
}

fn reject_if_invalid(code: &str, errors: Vec<FieldError>) -> EngineResult<()> {
    if errors.is_empty() {
        return Ok(());
    }
    warn!(code = %code, errors = errors.len(), "Rejected leave configuration");
    Err(EngineError::ConfigurationInvariant { errors })
}
