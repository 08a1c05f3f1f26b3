//! Property tests for balance derivation, request validation and the registry.

use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;
use rust_decimal::Decimal;

use leave_engine::calculation::{ValidationContext, derive_balance, validate_leave_request};
use leave_engine::config::{EngineSettings, HolidayCalendar};
use leave_engine::models::{
    Applicability, CalendarConfiguration, ConfigurationCarrier, CreditFrequency, CreditPolicy,
    EmployeeId, ExpireFrequency, ExpirePolicy, LeaveBalance, LeaveCategory, LeaveConfiguration,
    LeaveRequest, LeaveUnit, PolicyFlags, PresentationBalance, Restrictions, ScopeId,
};
use leave_engine::registry::ConfigurationRegistry;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn carrier(category: LeaveCategory, restrictions: Option<Restrictions>) -> ConfigurationCarrier {
    ConfigurationCarrier {
        scope_id: ScopeId::new("acme"),
        name: "Leave".to_string(),
        code: "LV".to_string(),
        tagline: String::new(),
        description: String::new(),
        category,
        flags: PolicyFlags {
            allow_restrictions: restrictions.is_some(),
            ..PolicyFlags::default()
        },
        credit_policy: Some(CreditPolicy {
            on_demand_credit: false,
            value: Decimal::ONE,
            frequency: CreditFrequency::Monthly,
            custom_dates: vec![],
            max_limit: Decimal::ZERO,
        }),
        expire_policy: Some(ExpirePolicy {
            carry_forward: true,
            expire_frequency: ExpireFrequency::Yearly,
            after_credit_expiry_days: 0,
            custom_dates: vec![],
        }),
        monetization_policy: None,
        restrictions,
        calendar: CalendarConfiguration::default(),
        applicability: Applicability::default(),
    }
}

fn configuration(category: LeaveCategory, restrictions: Option<Restrictions>) -> LeaveConfiguration {
    ConfigurationRegistry::new()
        .create(carrier(category, restrictions))
        .unwrap()
}

fn request(from: NaiveDate, to: NaiveDate) -> LeaveRequest {
    LeaveRequest {
        leave_type_code: "LV".to_string(),
        category: LeaveUnit::FullDay,
        from_date: Some(from),
        to_date: Some(to),
        partial_day_selection: None,
        from_time: None,
        to_time: None,
        reason: "Planned time away from work".to_string(),
        inform_to: vec![],
        untracked: false,
    }
}

/// The last day of a span starting on `from` that covers `working_days` weekdays.
fn span_end(from: NaiveDate, working_days: u32) -> NaiveDate {
    let mut remaining = working_days;
    let mut day = from;
    loop {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            remaining -= 1;
            if remaining == 0 {
                return day;
            }
        }
        day = day.succ_opt().unwrap();
    }
}

proptest! {
    #[test]
    fn derived_accrued_matches_ledger_identity(available in 0i64..100_000, consumed in 0i64..100_000) {
        let available = Decimal::new(available, 2);
        let consumed = Decimal::new(consumed, 2);
        let config = configuration(LeaveCategory::Accrued, None);
        let ledger = LeaveBalance::Accrued {
            available,
            consumed,
            accrued: available + consumed,
        };

        let derived = derive_balance(&config, &ledger).unwrap();
        let PresentationBalance::Accrued { accrued, .. } = &derived else {
            panic!("accrued configuration derived {derived:?}");
        };
        prop_assert!((*accrued - (available + consumed)).abs() <= Decimal::new(5, 2));
    }

    #[test]
    fn flexible_leave_is_never_rejected_for_balance(
        consumed in 0i64..10_000,
        offset in 1i64..120,
        length in 0i64..30,
    ) {
        let config = configuration(LeaveCategory::Flexible, None);
        let ledger = LeaveBalance::Flexible { consumed: Decimal::new(consumed, 1) };
        let from = today() + chrono::Duration::days(offset);
        let to = from + chrono::Duration::days(length);

        let settings = EngineSettings::default();
        let holidays = HolidayCalendar::default();
        let ctx = ValidationContext::new(today(), &settings, &holidays);
        let verdict = validate_leave_request(&request(from, to), &config, &ledger, &ctx).unwrap();

        prop_assert!(verdict.reasons().iter().all(|r| !r.message.contains("insufficient balance")));
        let has_working_day = from
            .iter_days()
            .take_while(|d| *d <= to)
            .any(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun));
        prop_assert_eq!(verdict.is_accepted(), has_working_day);
    }

    #[test]
    fn consecutive_day_limit_is_inclusive(max in 1u32..40) {
        let config = configuration(
            LeaveCategory::Accrued,
            Some(Restrictions { max_consecutive_days: max, ..Restrictions::default() }),
        );
        let ledger = LeaveBalance::Accrued {
            available: Decimal::from(100),
            consumed: Decimal::ZERO,
            accrued: Decimal::from(100),
        };
        let settings = EngineSettings::default();
        let holidays = HolidayCalendar::default();
        let ctx = ValidationContext::new(today(), &settings, &holidays);
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let exact = request(monday, span_end(monday, max));
        prop_assert!(validate_leave_request(&exact, &config, &ledger, &ctx).unwrap().is_accepted());

        let longer = request(monday, span_end(monday, max + 1));
        let verdict = validate_leave_request(&longer, &config, &ledger, &ctx).unwrap();
        prop_assert_eq!(verdict.reasons().len(), 1);
        let expected = format!("maximum of {} consecutive days", max);
        prop_assert!(verdict.reasons()[0].message.contains(&expected));
    }

    #[test]
    fn assigning_employees_twice_changes_nothing(ids in proptest::collection::vec("[a-z]{1,6}", 0..12)) {
        let mut registry = ConfigurationRegistry::new();
        let created = registry.create(carrier(LeaveCategory::Accrued, None)).unwrap();
        let ids: Vec<EmployeeId> = ids.into_iter().map(EmployeeId::new).collect();

        let first = registry.assign_employees(created.id, ids.clone()).unwrap();
        let second = registry.assign_employees(created.id, ids).unwrap();
        prop_assert_eq!(first, second);
    }
}
