//! Performance benchmarks for the Leave Policy Engine.
//!
//! Covers the pure engine (balance derivation, leave validation over
//! growing spans) and one full validation round trip through the router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::HashMap;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use axum::{body::Body, http::Request};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tower::ServiceExt;

use leave_engine::api::{AppState, create_router};
use leave_engine::calculation::{
    ValidationContext, derive_employee_balances, validate_leave_request,
};
use leave_engine::config::ConfigLoader;
use leave_engine::models::{
    Applicability, CalendarConfiguration, ConfigurationCarrier, CreditFrequency, CreditPolicy,
    ExpireFrequency, ExpirePolicy, LeaveBalance, LeaveCategory, LeaveConfiguration, LeaveRequest,
    LeaveUnit, PolicyFlags, Restrictions, ScopeId,
};
use leave_engine::registry::ConfigurationRegistry;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

fn carrier(code: &str, category: LeaveCategory) -> ConfigurationCarrier {
    ConfigurationCarrier {
        scope_id: ScopeId::new("bench"),
        name: format!("{} leave", code),
        code: code.to_string(),
        tagline: String::new(),
        description: String::new(),
        category,
        flags: PolicyFlags {
            allow_restrictions: true,
            ..PolicyFlags::default()
        },
        credit_policy: Some(CreditPolicy {
            on_demand_credit: false,
            value: Decimal::new(15, 1),
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
        restrictions: Some(Restrictions {
            max_consecutive_days: 60,
            ..Restrictions::default()
        }),
        calendar: CalendarConfiguration::default(),
        applicability: Applicability::default(),
    }
}

/// A registry holding `count` accrued configurations, plus their ledgers.
fn accrued_fixture(count: usize) -> (Vec<LeaveConfiguration>, HashMap<String, LeaveBalance>) {
    let mut registry = ConfigurationRegistry::new();
    let mut ledger = HashMap::new();
    let configurations = (0..count)
        .map(|i| {
            let code = format!("L{:03}", i);
            ledger.insert(
                code.clone(),
                LeaveBalance::Accrued {
                    available: Decimal::new(100 + i as i64, 1),
                    consumed: Decimal::new(25, 1),
                    accrued: Decimal::new(125 + i as i64, 1),
                },
            );
            registry
                .create(carrier(&code, LeaveCategory::Accrued))
                .expect("valid configuration")
        })
        .collect();
    (configurations, ledger)
}

fn full_day_request(code: &str, from: NaiveDate, days: i64) -> LeaveRequest {
    LeaveRequest {
        leave_type_code: code.to_string(),
        category: LeaveUnit::FullDay,
        from_date: Some(from),
        to_date: Some(from + Duration::days(days - 1)),
        partial_day_selection: None,
        from_time: None,
        to_time: None,
        reason: "Planned annual holiday".to_string(),
        inform_to: vec![],
        untracked: false,
    }
}

/// Benchmark: deriving every balance of one employee.
fn bench_derive_balances(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_balances");

    for count in [1usize, 10, 50] {
        let (configurations, ledger) = accrued_fixture(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("leave_types", count), &count, |b, _| {
            b.iter(|| black_box(derive_employee_balances(&configurations, &ledger).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark: validating leave requests of growing length.
fn bench_validate_leave(c: &mut Criterion) {
    let config = load_config();
    let (configurations, ledger) = accrued_fixture(1);
    let configuration = &configurations[0];
    let balance = &ledger[configuration.code()];
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let ctx = ValidationContext::new(today, config.settings(), config.holidays());

    let mut group = c.benchmark_group("validate_leave");
    for days in [1i64, 5, 30] {
        let request = full_day_request(configuration.code(), today + Duration::days(1), days);
        group.bench_with_input(BenchmarkId::new("span_days", days), &days, |b, _| {
            b.iter(|| {
                black_box(validate_leave_request(&request, configuration, balance, &ctx).unwrap())
            })
        });
    }
    group.finish();
}

/// Benchmark: a validation request through the HTTP router.
fn bench_validate_via_router(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut registry = ConfigurationRegistry::new();
    registry
        .create(carrier("AL", LeaveCategory::Accrued))
        .expect("valid configuration");
    let router = create_router(AppState::with_registry(load_config(), registry));

    let body = serde_json::json!({
        "scope_id": "bench",
        "request": {
            "leave_type_code": "AL",
            "category": "full_day",
            "from_date": "2026-10-19",
            "to_date": "2026-10-23",
            "reason": "Planned annual holiday"
        },
        "balance": {"category": "accrued", "available": "10", "consumed": "2", "accrued": "12"},
        "as_of": "2026-10-18"
    })
    .to_string();

    c.bench_function("validate_via_router", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/leave-requests/validate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_derive_balances,
    bench_validate_leave,
    bench_validate_via_router,
);
criterion_main!(benches);
