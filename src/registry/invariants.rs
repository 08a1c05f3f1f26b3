//! Field-level invariants a configuration must satisfy before it is stored.

use crate::error::FieldError;
use crate::models::ConfigurationCarrier;

/// Collects every invariant failure of `carrier`.
///
/// Expects flags already derived from the category. A policy is only
/// required and validated while its flag is on; a disabled policy is kept
/// as entered and not checked.
pub(crate) fn validate_carrier(carrier: &ConfigurationCarrier) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if carrier.name.trim().is_empty() {
        errors.push(FieldError::new("name", "must not be empty"));
    }
    if carrier.code.trim().is_empty() {
        errors.push(FieldError::new("code", "must not be empty"));
    }
    if carrier.flags.effective_units(carrier.category).is_empty() {
        errors.push(FieldError::new(
            "flags.allowed_units",
            format!(
                "must allow at least one leave unit usable by {} leave",
                carrier.category
            ),
        ));
    }

    let flags = &carrier.flags;
    check_policy(
        &mut errors,
        "credit_policy",
        flags.allow_credit_policy,
        carrier.credit_policy.as_ref().map(|p| p.validate()),
    );
    check_policy(
        &mut errors,
        "expire_policy",
        flags.allow_expire_policy,
        carrier.expire_policy.as_ref().map(|p| p.validate()),
    );
    check_policy(
        &mut errors,
        "monetization_policy",
        flags.allow_monetization,
        carrier.monetization_policy.as_ref().map(|p| p.validate()),
    );
    check_policy(
        &mut errors,
        "restrictions",
        flags.allow_restrictions,
        carrier.restrictions.as_ref().map(|p| p.validate()),
    );

    if let Err(calendar_errors) = carrier.calendar.validate() {
        errors.extend(calendar_errors.into_iter().map(|e| e.nested("calendar")));
    }

    errors
}

fn check_policy(
    errors: &mut Vec<FieldError>,
    field: &str,
    enabled: bool,
    outcome: Option<Result<(), Vec<FieldError>>>,
) {
    if !enabled {
        return;
    }
    match outcome {
        None => errors.push(FieldError::new(
            field,
            format!("is required when the {} flag is on", field),
        )),
        Some(Err(policy_errors)) => {
            errors.extend(policy_errors.into_iter().map(|e| e.nested(field)));
        }
        Some(Ok(())) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Applicability, CalendarConfiguration, CreditFrequency, CreditPolicy, ExpireFrequency,
        ExpirePolicy, LeaveCategory, LeaveUnit, PeriodType, PolicyFlags, ScopeId,
    };
    use rust_decimal::Decimal;

    fn flexible() -> ConfigurationCarrier {
        ConfigurationCarrier {
            scope_id: ScopeId::new("acme"),
            name: "Work From Home".to_string(),
            code: "WFH".to_string(),
            tagline: String::new(),
            description: String::new(),
            category: LeaveCategory::Flexible,
            flags: PolicyFlags::default(),
            credit_policy: None,
            expire_policy: None,
            monetization_policy: None,
            restrictions: None,
            calendar: CalendarConfiguration::default(),
            applicability: Applicability::default(),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_minimal_flexible_carrier_is_valid() {
        assert!(validate_carrier(&flexible()).is_empty());
    }

    #[test]
    fn test_blank_name_and_code_rejected() {
        let carrier = ConfigurationCarrier {
            name: "  ".to_string(),
            code: String::new(),
            ..flexible()
        };
        assert_eq!(fields(&validate_carrier(&carrier)), vec!["name", "code"]);
    }

    #[test]
    fn test_enabled_policy_is_required() {
        let carrier = ConfigurationCarrier {
            flags: PolicyFlags {
                allow_credit_policy: true,
                ..PolicyFlags::default()
            },
            ..flexible()
        };
        let errors = validate_carrier(&carrier);
        assert_eq!(fields(&errors), vec!["credit_policy"]);
        assert!(errors[0].message.contains("required"));
    }

    #[test]
    fn test_policy_errors_are_nested() {
        let carrier = ConfigurationCarrier {
            flags: PolicyFlags {
                allow_credit_policy: true,
                allow_expire_policy: true,
                ..PolicyFlags::default()
            },
            credit_policy: Some(CreditPolicy {
                on_demand_credit: false,
                value: Decimal::ONE,
                frequency: CreditFrequency::Custom,
                custom_dates: vec![],
                max_limit: Decimal::ZERO,
            }),
            expire_policy: Some(ExpirePolicy {
                carry_forward: false,
                expire_frequency: ExpireFrequency::AfterCredit,
                after_credit_expiry_days: 0,
                custom_dates: vec![],
            }),
            ..flexible()
        };
        assert_eq!(
            fields(&validate_carrier(&carrier)),
            vec!["credit_policy.custom_dates", "expire_policy.after_credit_expiry_days"]
        );
    }

    #[test]
    fn test_disabled_policy_is_not_validated() {
        let carrier = ConfigurationCarrier {
            credit_policy: Some(CreditPolicy {
                on_demand_credit: false,
                value: -Decimal::ONE,
                frequency: CreditFrequency::Monthly,
                custom_dates: vec![],
                max_limit: Decimal::ZERO,
            }),
            ..flexible()
        };
        assert!(validate_carrier(&carrier).is_empty());
    }

    #[test]
    fn test_calendar_errors_are_nested() {
        let carrier = ConfigurationCarrier {
            calendar: CalendarConfiguration {
                month_type: PeriodType::Custom,
                start_day: 40,
                ..CalendarConfiguration::default()
            },
            ..flexible()
        };
        assert_eq!(fields(&validate_carrier(&carrier)), vec!["calendar.start_day"]);
    }

    #[test]
    fn test_empty_unit_set_rejected() {
        let carrier = ConfigurationCarrier {
            flags: PolicyFlags {
                allowed_units: Default::default(),
                ..PolicyFlags::default()
            },
            ..flexible()
        };
        assert_eq!(fields(&validate_carrier(&carrier)), vec!["flags.allowed_units"]);
    }

    #[test]
    fn test_units_ruled_out_by_category_count_as_empty() {
        let only_timing = PolicyFlags {
            allowed_units: [LeaveUnit::PartialTiming].into_iter().collect(),
            ..PolicyFlags::default()
        };
        let special = ConfigurationCarrier {
            category: LeaveCategory::Special,
            flags: only_timing.clone(),
            ..flexible()
        };
        assert_eq!(fields(&validate_carrier(&special)), vec!["flags.allowed_units"]);

        let timing_flexible = ConfigurationCarrier {
            flags: only_timing,
            ..flexible()
        };
        assert!(validate_carrier(&timing_flexible).is_empty());
    }
}
