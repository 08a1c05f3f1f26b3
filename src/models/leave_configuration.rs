//! Leave configuration: the aggregate describing one leave type.
//!
//! A [`LeaveConfiguration`] groups the policy value objects under a
//! [`LeaveCategory`], together with identity, applicability rules and the
//! employees it is assigned to. Policies are stored independently of the
//! `allow_*` flags that gate them, so switching a flag off never loses the
//! values an administrator entered.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::employee::{EmployeeId, EmployeeProfile, EmployeeType, Gender, MaritalStatus, ScopeId};
use super::policy::{
    CalendarConfiguration, CreditPolicy, ExpirePolicy, MonetizationPolicy, Restrictions,
};

/// The category of a leave type, which fixes its balance shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveCategory {
    /// Unbounded leave; only consumption is tracked.
    Flexible,
    /// Leave credited on a cycle and consumed from the accrued total.
    Accrued,
    /// Leave granted on request (e.g. comp-off), which can expire.
    Special,
    /// Accrued leave part of which can be cashed out.
    Monetization,
}

impl LeaveCategory {
    /// Returns true if leave of this category can be requested in `unit`.
    ///
    /// Partial-timing leave is only offered for flexible leave.
    pub fn supports_unit(self, unit: LeaveUnit) -> bool {
        unit != LeaveUnit::PartialTiming || self == LeaveCategory::Flexible
    }
}

impl fmt::Display for LeaveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveCategory::Flexible => write!(f, "flexible"),
            LeaveCategory::Accrued => write!(f, "accrued"),
            LeaveCategory::Special => write!(f, "special"),
            LeaveCategory::Monetization => write!(f, "monetization"),
        }
    }
}

/// The unit in which leave can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveUnit {
    /// One or more whole days.
    FullDay,
    /// Half of a single day.
    PartialDay,
    /// A time window within a single day.
    PartialTiming,
}

impl fmt::Display for LeaveUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveUnit::FullDay => write!(f, "full_day"),
            LeaveUnit::PartialDay => write!(f, "partial_day"),
            LeaveUnit::PartialTiming => write!(f, "partial_timing"),
        }
    }
}

/// The switches that enable each policy, plus the allowed leave units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyFlags {
    /// Credit policy is in effect.
    pub allow_credit_policy: bool,
    /// Expire policy is in effect.
    pub allow_expire_policy: bool,
    /// Monetization policy is in effect.
    pub allow_monetization: bool,
    /// Restrictions are in effect.
    pub allow_restrictions: bool,
    /// Units the administrator chose. The category may rule some out; see
    /// [`PolicyFlags::effective_units`].
    pub allowed_units: BTreeSet<LeaveUnit>,
}

impl Default for PolicyFlags {
    fn default() -> Self {
        Self {
            allow_credit_policy: false,
            allow_expire_policy: false,
            allow_monetization: false,
            allow_restrictions: false,
            allowed_units: [LeaveUnit::FullDay, LeaveUnit::PartialDay, LeaveUnit::PartialTiming]
                .into_iter()
                .collect(),
        }
    }
}

impl PolicyFlags {
    /// The chosen units that `category` supports.
    pub fn effective_units(&self, category: LeaveCategory) -> BTreeSet<LeaveUnit> {
        self.allowed_units
            .iter()
            .copied()
            .filter(|unit| category.supports_unit(*unit))
            .collect()
    }
}

/// Which employees a leave type is meant for. `None` or empty means any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Applicability {
    /// Restrict to one gender.
    pub gender: Option<Gender>,
    /// Restrict to one marital status.
    pub marital_status: Option<MaritalStatus>,
    /// Restrict to these employment types.
    pub employee_types: BTreeSet<EmployeeType>,
}

impl Applicability {
    /// Returns true if the employee matches every applicability rule.
    pub fn matches(&self, employee: &EmployeeProfile) -> bool {
        self.gender.is_none_or(|g| g == employee.gender)
            && self.marital_status.is_none_or(|m| m == employee.marital_status)
            && (self.employee_types.is_empty()
                || self.employee_types.contains(&employee.employee_type))
    }
}

/// The authored content of a leave configuration, without identity or
/// lifecycle fields. This is what administrators submit on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationCarrier {
    /// The organizational scope owning the configuration.
    pub scope_id: ScopeId,
    /// Display name (e.g. "Annual Leave").
    pub name: String,
    /// Short code, unique within the scope (e.g. "AL").
    pub code: String,
    /// One-line summary.
    #[serde(default)]
    pub tagline: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// The leave category.
    pub category: LeaveCategory,
    /// Policy switches.
    #[serde(default)]
    pub flags: PolicyFlags,
    /// Credit policy.
    #[serde(default)]
    pub credit_policy: Option<CreditPolicy>,
    /// Expire policy.
    #[serde(default)]
    pub expire_policy: Option<ExpirePolicy>,
    /// Monetization policy.
    #[serde(default)]
    pub monetization_policy: Option<MonetizationPolicy>,
    /// Restrictions.
    #[serde(default)]
    pub restrictions: Option<Restrictions>,
    /// Leave calendar.
    #[serde(default)]
    pub calendar: CalendarConfiguration,
    /// Applicability rules.
    #[serde(default)]
    pub applicability: Applicability,
}

/// A partial update to a leave configuration. Absent fields are unchanged.
///
/// `code` may be supplied but must equal the stored code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationPatch {
    /// New name.
    pub name: Option<String>,
    /// Must match the existing code if present.
    pub code: Option<String>,
    /// New tagline.
    pub tagline: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<LeaveCategory>,
    /// New policy switches.
    pub flags: Option<PolicyFlags>,
    /// New credit policy.
    pub credit_policy: Option<CreditPolicy>,
    /// New expire policy.
    pub expire_policy: Option<ExpirePolicy>,
    /// New monetization policy.
    pub monetization_policy: Option<MonetizationPolicy>,
    /// New restrictions.
    pub restrictions: Option<Restrictions>,
    /// New calendar.
    pub calendar: Option<CalendarConfiguration>,
    /// New applicability rules.
    pub applicability: Option<Applicability>,
}

impl From<ConfigurationCarrier> for ConfigurationPatch {
    fn from(carrier: ConfigurationCarrier) -> Self {
        Self {
            name: Some(carrier.name),
            code: Some(carrier.code),
            tagline: Some(carrier.tagline),
            description: Some(carrier.description),
            category: Some(carrier.category),
            flags: Some(carrier.flags),
            credit_policy: carrier.credit_policy,
            expire_policy: carrier.expire_policy,
            monetization_policy: carrier.monetization_policy,
            restrictions: carrier.restrictions,
            calendar: Some(carrier.calendar),
            applicability: Some(carrier.applicability),
        }
    }
}

impl ConfigurationPatch {
    /// Applies the patch on top of `carrier`, leaving `code` untouched.
    pub fn apply_to(self, carrier: &mut ConfigurationCarrier) {
        if let Some(name) = self.name {
            carrier.name = name;
        }
        if let Some(tagline) = self.tagline {
            carrier.tagline = tagline;
        }
        if let Some(description) = self.description {
            carrier.description = description;
        }
        if let Some(category) = self.category {
            carrier.category = category;
        }
        if let Some(flags) = self.flags {
            carrier.flags = flags;
        }
        if self.credit_policy.is_some() {
            carrier.credit_policy = self.credit_policy;
        }
        if self.expire_policy.is_some() {
            carrier.expire_policy = self.expire_policy;
        }
        if self.monetization_policy.is_some() {
            carrier.monetization_policy = self.monetization_policy;
        }
        if self.restrictions.is_some() {
            carrier.restrictions = self.restrictions;
        }
        if let Some(calendar) = self.calendar {
            carrier.calendar = calendar;
        }
        if let Some(applicability) = self.applicability {
            carrier.applicability = applicability;
        }
    }
}

/// A stored leave configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveConfiguration {
    /// Unique identity.
    pub id: Uuid,
    /// The authored content.
    #[serde(flatten)]
    pub carrier: ConfigurationCarrier,
    /// Employees this configuration is assigned to.
    #[serde(default)]
    pub employee_ids: BTreeSet<EmployeeId>,
    /// When the configuration was created.
    pub created_at: DateTime<Utc>,
    /// When the configuration was last changed.
    pub updated_at: DateTime<Utc>,
}

impl LeaveConfiguration {
    /// The leave code.
    pub fn code(&self) -> &str {
        &self.carrier.code
    }

    /// The leave category.
    pub fn category(&self) -> LeaveCategory {
        self.carrier.category
    }

    /// The policy switches.
    pub fn flags(&self) -> &PolicyFlags {
        &self.carrier.flags
    }

    /// The leave calendar.
    pub fn calendar(&self) -> &CalendarConfiguration {
        &self.carrier.calendar
    }

    /// The credit policy, if enabled.
    pub fn active_credit_policy(&self) -> Option<&CreditPolicy> {
        self.carrier
            .credit_policy
            .as_ref()
            .filter(|_| self.carrier.flags.allow_credit_policy)
    }

    /// The expire policy, if enabled.
    pub fn active_expire_policy(&self) -> Option<&ExpirePolicy> {
        self.carrier
            .expire_policy
            .as_ref()
            .filter(|_| self.carrier.flags.allow_expire_policy)
    }

    /// The monetization policy, if enabled.
    pub fn active_monetization_policy(&self) -> Option<&MonetizationPolicy> {
        self.carrier
            .monetization_policy
            .as_ref()
            .filter(|_| self.carrier.flags.allow_monetization)
    }

    /// The restrictions, if enabled.
    pub fn active_restrictions(&self) -> Option<&Restrictions> {
        self.carrier
            .restrictions
            .as_ref()
            .filter(|_| self.carrier.flags.allow_restrictions)
    }

    /// Returns true if leave can be requested in `unit`.
    pub fn allows_unit(&self, unit: LeaveUnit) -> bool {
        self.category().supports_unit(unit) && self.carrier.flags.allowed_units.contains(&unit)
    }

    /// Returns true if the employee matches the applicability rules.
    pub fn applies_to(&self, employee: &EmployeeProfile) -> bool {
        self.carrier.applicability.matches(employee)
    }
}
