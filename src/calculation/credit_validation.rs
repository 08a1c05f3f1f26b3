//! Credit request validation.
//!
//! A credit asks for days to be added to a special leave balance, so there is
//! no affordability check. The credit type must name a special configuration.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    AcceptedCredit, CreditRequest, LeaveCategory, LeaveConfiguration, Rejection, Verdict,
};

use super::day_detection::span_days;
use super::request_checks::{
    ValidationContext, check_date_range, check_not_past, check_reason, dedup_recipients,
};

/// Validates a credit request against the configurations in the employee's scope.
///
/// Structural problems (missing or reversed dates, reason length, unknown or
/// non-special credit type) are all reported together and stop validation.
/// The past-date check follows and is skipped for untracked entries.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use leave_engine::calculation::{ValidationContext, validate_credit_request};
/// use leave_engine::config::{EngineSettings, HolidayCalendar};
/// use leave_engine::models::CreditRequest;
///
/// let settings = EngineSettings::default();
/// let holidays = HolidayCalendar::default();
/// let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// let ctx = ValidationContext::new(today, &settings, &holidays);
///
/// let request = CreditRequest {
///     credit_type: "COMP".to_string(),
///     from_date: NaiveDate::from_ymd_opt(2026, 10, 24),
///     to_date: NaiveDate::from_ymd_opt(2026, 10, 24),
///     reason: "Weekend release support".to_string(),
///     inform_to: vec![],
///     untracked: false,
/// };
/// let verdict = validate_credit_request(&request, &[], &ctx);
/// assert_eq!(verdict.reasons()[0].field, "credit_type");
/// ```
pub fn validate_credit_request(
    request: &CreditRequest,
    configurations: &[LeaveConfiguration],
    ctx: &ValidationContext<'_>,
) -> Verdict<AcceptedCredit> {
    let mut rejections = Vec::new();

    check_date_range(request.from_date, request.to_date, &mut rejections);
    rejections.extend(check_reason(&request.reason, ctx.settings));

    let code = request.credit_type.trim();
    let target = configurations
        .iter()
        .find(|c| c.code().trim().eq_ignore_ascii_case(code));
    match target {
        None => rejections.push(Rejection::structural(
            "credit_type",
            format!("credit_type '{}' does not match any leave configuration", code),
        )),
        Some(config) if config.category() != LeaveCategory::Special => {
            rejections.push(Rejection::structural(
                "credit_type",
                format!(
                    "creditType must reference a special-category configuration, '{}' is {}",
                    config.code(),
                    config.category()
                ),
            ));
        }
        Some(_) => {}
    }

    let (Some(from), Some(to), Some(config), true) =
        (request.from_date, request.to_date, target, rejections.is_empty())
    else {
        debug!(
            credit_type = %code,
            rejections = rejections.len(),
            "Credit request rejected at structural stage"
        );
        return Verdict::Rejected {
            reasons: rejections,
        };
    };

    rejections.extend(check_not_past(from, ctx.today, request.untracked));

    let days = Decimal::from(span_days(from, to));
    debug!(
        credit_type = %config.code(),
        days = %days,
        rejections = rejections.len(),
        "Validated credit request"
    );

    Verdict::from_rejections(rejections, || AcceptedCredit {
        credit_type: config.code().to_string(),
        from_date: from,
        to_date: to,
        days,
        reason: request.reason.trim().to_string(),
        inform_to: dedup_recipients(&request.inform_to),
        untracked: request.untracked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineSettings, HolidayCalendar};
    use crate::models::{
        Applicability, CalendarConfiguration, ConfigurationCarrier, EmployeeId, PolicyFlags,
        RejectionKind, ScopeId,
    };
    use chrono::{NaiveDate, Utc};
    use std::collections::BTreeSet;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn configuration(code: &str, category: LeaveCategory) -> LeaveConfiguration {
        let now = Utc::now();
        LeaveConfiguration {
            id: Uuid::new_v4(),
            carrier: ConfigurationCarrier {
                scope_id: ScopeId::new("acme"),
                name: code.to_string(),
                code: code.to_string(),
                tagline: String::new(),
                description: String::new(),
                category,
                flags: PolicyFlags::default(),
                credit_policy: None,
                expire_policy: None,
                monetization_policy: None,
                restrictions: None,
                calendar: CalendarConfiguration::default(),
                applicability: Applicability::default(),
            },
            employee_ids: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn configurations() -> Vec<LeaveConfiguration> {
        vec![
            configuration("COMP", LeaveCategory::Special),
            configuration("WFH", LeaveCategory::Flexible),
        ]
    }

    fn request(credit_type: &str, from: NaiveDate, to: NaiveDate) -> CreditRequest {
        CreditRequest {
            credit_type: credit_type.to_string(),
            from_date: Some(from),
            to_date: Some(to),
            reason: "Worked through the weekend release".to_string(),
            inform_to: vec![EmployeeId::new("emp_9"), EmployeeId::new("emp_9")],
            untracked: false,
        }
    }

    fn validate(request: &CreditRequest) -> Verdict<AcceptedCredit> {
        let settings = EngineSettings::default();
        let holidays = HolidayCalendar::default();
        let ctx = ValidationContext::new(date(2026, 10, 18), &settings, &holidays);
        validate_credit_request(request, &configurations(), &ctx)
    }

    #[test]
    fn test_special_credit_accepted_with_inclusive_days() {
        let verdict = validate(&request("comp", date(2026, 10, 24), date(2026, 10, 25)));
        let payload = verdict.payload().expect("accepted");
        assert_eq!(payload.credit_type, "COMP");
        assert_eq!(payload.days, Decimal::from(2));
        assert_eq!(payload.inform_to, vec![EmployeeId::new("emp_9")]);
    }

    #[test]
    fn test_flexible_credit_type_is_structural_rejection() {
        let verdict = validate(&request("WFH", date(2026, 10, 24), date(2026, 10, 24)));
        assert_eq!(verdict.reasons().len(), 1);
        let reason = &verdict.reasons()[0];
        assert_eq!(reason.kind, RejectionKind::Structural);
        assert!(
            reason
                .message
                .contains("creditType must reference a special-category configuration")
        );
    }

    #[test]
    fn test_unknown_credit_type_rejected() {
        let verdict = validate(&request("XYZ", date(2026, 10, 24), date(2026, 10, 24)));
        assert_eq!(verdict.reasons()[0].field, "credit_type");
        assert!(verdict.reasons()[0].message.contains("does not match"));
    }

    #[test]
    fn test_structural_failures_reported_together() {
        let bad = CreditRequest {
            to_date: None,
            reason: "tiny".to_string(),
            ..request("WFH", date(2026, 10, 24), date(2026, 10, 24))
        };
        let verdict = validate(&bad);
        let fields: Vec<&str> = verdict.reasons().iter().map(|r| r.field.as_str()).collect();
        assert_eq!(fields, vec!["to_date", "reason", "credit_type"]);
    }

    #[test]
    fn test_past_credit_requires_untracked() {
        let past = request("COMP", date(2026, 10, 10), date(2026, 10, 11));
        let verdict = validate(&past);
        assert_eq!(verdict.reasons()[0].field, "from_date");

        let untracked = CreditRequest {
            untracked: true,
            ..past
        };
        assert!(validate(&untracked).is_accepted());
    }
}
