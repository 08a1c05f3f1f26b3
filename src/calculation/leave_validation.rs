//! Leave request validation.
//!
//! Runs the checks in a fixed order:
//! 1. structural (required fields, ordering, reason length),
//! 2. temporal (no past dates unless untracked),
//! 3. duration (business days, or the fixed partial unit),
//! 4. affordability (skipped for flexible leave),
//! 5. policy (restrictions, leave units, bookings, applicability).
//!
//! Structural problems stop validation after stage 1. Every later failure is
//! collected so the submitter sees all of them at once.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AcceptedLeave, BookedLeave, LeaveBalance, LeaveCategory, LeaveConfiguration, LeaveRequest,
    LeaveUnit, Rejection, Restrictions, Verdict,
};

use super::balance_derivation::{check_ledger, ensure_matching_category};
use super::day_detection::count_leave_days;
use super::request_checks::{
    ValidationContext, check_not_past, check_reason, check_span_length, dedup_recipients,
};

/// Validates a leave request against its configuration and current balance.
///
/// Returns `Ok(Verdict)` for every business outcome. `Err` is reserved for
/// caller misuse: a request checked against the configuration of a different
/// leave code, or a ledger that does not fit the configuration's category.
pub fn validate_leave_request(
    request: &LeaveRequest,
    config: &LeaveConfiguration,
    balance: &LeaveBalance,
    ctx: &ValidationContext<'_>,
) -> EngineResult<Verdict<AcceptedLeave>> {
    if !request
        .leave_type_code
        .trim()
        .eq_ignore_ascii_case(config.code().trim())
    {
        return Err(EngineError::contract(format!(
            "request for leave type '{}' was checked against configuration '{}'",
            request.leave_type_code,
            config.code()
        )));
    }
    ensure_matching_category(config, balance)?;
    check_ledger(balance)?;

    let (from, to) = match check_structure(request, ctx) {
        Ok(span) => span,
        Err(rejections) => {
            debug!(
                code = %config.code(),
                rejections = rejections.len(),
                "Leave request rejected at structural stage"
            );
            return Ok(Verdict::Rejected {
                reasons: rejections,
            });
        }
    };

    let restrictions = config.active_restrictions();
    let mut rejections = Vec::new();

    rejections.extend(check_not_past(from, ctx.today, request.untracked));

    let duration = leave_duration(request.category, from, to, restrictions, ctx);
    if duration.is_zero() {
        rejections.push(Rejection::policy(
            "to_date",
            format!("leave from {} to {} contains no working days", from, to),
        ));
    }

    rejections.extend(check_affordability(config, balance, duration));
    rejections.extend(check_policy(request, config, restrictions, from, to, duration, ctx));

    debug!(
        code = %config.code(),
        unit = %request.category,
        duration = %duration,
        rejections = rejections.len(),
        "Validated leave request"
    );

    Ok(Verdict::from_rejections(rejections, || AcceptedLeave {
        leave_type_code: config.code().to_string(),
        category: request.category,
        from_date: from,
        to_date: to,
        partial_day_selection: request.partial_day_selection,
        from_time: request.from_time,
        to_time: request.to_time,
        duration,
        reason: request.reason.trim().to_string(),
        inform_to: dedup_recipients(&request.inform_to),
        untracked: request.untracked,
        requires_approval: restrictions.is_some_and(|r| r.approval_required),
    }))
}

/// Stage 1. Returns the leave span, or every structural problem found.
fn check_structure(
    request: &LeaveRequest,
    ctx: &ValidationContext<'_>,
) -> Result<(NaiveDate, NaiveDate), Vec<Rejection>> {
    let mut rejections = Vec::new();

    if request.from_date.is_none() {
        rejections.push(Rejection::structural("from_date", "from_date is required"));
    }

    match request.category {
        LeaveUnit::FullDay => match (request.from_date, request.to_date) {
            (_, None) => {
                rejections.push(Rejection::structural("to_date", "to_date is required"));
            }
            (Some(from), Some(to)) if to < from => {
                rejections.push(Rejection::structural(
                    "to_date",
                    format!("to_date {} is before from_date {}", to, from),
                ));
            }
            (Some(from), Some(to)) => rejections.extend(check_span_length(from, to)),
            _ => {}
        },
        LeaveUnit::PartialDay => {
            if request.partial_day_selection.is_none() {
                rejections.push(Rejection::structural(
                    "partial_day_selection",
                    "partial_day_selection is required for partial-day leave",
                ));
            }
            rejections.extend(check_single_day(request));
        }
        LeaveUnit::PartialTiming => {
            match (request.from_time, request.to_time) {
                (Some(from), Some(to)) if to <= from => {
                    rejections.push(Rejection::structural(
                        "to_time",
                        format!("to_time {} must be after from_time {}", to, from),
                    ));
                }
                (from, to) => {
                    if from.is_none() {
                        rejections.push(Rejection::structural(
                            "from_time",
                            "from_time is required for partial-timing leave",
                        ));
                    }
                    if to.is_none() {
                        rejections.push(Rejection::structural(
                            "to_time",
                            "to_time is required for partial-timing leave",
                        ));
                    }
                }
            }
            rejections.extend(check_single_day(request));
        }
    }

    rejections.extend(check_reason(&request.reason, ctx.settings));

    match (rejections.is_empty(), request.from_date) {
        (true, Some(from)) => {
            let to = match request.category {
                LeaveUnit::FullDay => request.to_date.unwrap_or(from),
                LeaveUnit::PartialDay | LeaveUnit::PartialTiming => from,
            };
            Ok((from, to))
        }
        _ => Err(rejections),
    }
}

/// Partial leave covers exactly one day.
fn check_single_day(request: &LeaveRequest) -> Option<Rejection> {
    match (request.from_date, request.to_date) {
        (Some(from), Some(to)) if from != to => Some(Rejection::structural(
            "to_date",
            format!(
                "{} leave must start and end on the same day, got {} to {}",
                request.category, from, to
            ),
        )),
        _ => None,
    }
}

/// Stage 3. Days deducted for the request.
fn leave_duration(
    unit: LeaveUnit,
    from: NaiveDate,
    to: NaiveDate,
    restrictions: Option<&Restrictions>,
    ctx: &ValidationContext<'_>,
) -> Decimal {
    match unit {
        LeaveUnit::FullDay => {
            let include_non_working = restrictions.is_some_and(|r| r.include_holidays_weekends);
            Decimal::from(count_leave_days(from, to, include_non_working, ctx.holidays))
        }
        LeaveUnit::PartialDay => ctx.settings.partial_day_units,
        LeaveUnit::PartialTiming => ctx.settings.partial_timing_units,
    }
}

/// Stage 4. Flexible leave has no ceiling and is never checked.
fn check_affordability(
    config: &LeaveConfiguration,
    balance: &LeaveBalance,
    duration: Decimal,
) -> Option<Rejection> {
    if config.category() == LeaveCategory::Flexible {
        return None;
    }
    let available = balance.available().unwrap_or_default();
    if duration > available {
        Some(Rejection::policy(
            "leave_type_code",
            format!(
                "insufficient balance, {} available, {} requested",
                available.normalize(),
                duration.normalize()
            ),
        ))
    } else {
        None
    }
}

/// Stage 5.
fn check_policy(
    request: &LeaveRequest,
    config: &LeaveConfiguration,
    restrictions: Option<&Restrictions>,
    from: NaiveDate,
    to: NaiveDate,
    duration: Decimal,
    ctx: &ValidationContext<'_>,
) -> Vec<Rejection> {
    let mut rejections = Vec::new();

    if !config.allows_unit(request.category) {
        rejections.push(Rejection::policy(
            "category",
            format!(
                "{} leave is not allowed for leave type '{}'",
                request.category,
                config.code()
            ),
        ));
    }

    if let Some(employee) = ctx.employee {
        if !config.applies_to(employee) {
            rejections.push(Rejection::policy(
                "leave_type_code",
                format!(
                    "leave type '{}' does not apply to employee {}",
                    config.code(),
                    employee.id
                ),
            ));
        }
    }

    if let Some(booked) = ctx.booked.iter().find(|b| overlaps(b, from, to)) {
        rejections.push(Rejection::policy(
            "from_date",
            format!(
                "leave overlaps leave already booked from {} to {}",
                booked.from_date, booked.to_date
            ),
        ));
    }

    let Some(restrictions) = restrictions else {
        return rejections;
    };

    if restrictions.max_consecutive_days > 0
        && duration > Decimal::from(restrictions.max_consecutive_days)
    {
        rejections.push(Rejection::policy(
            "to_date",
            format!(
                "leave of {} days exceeds the maximum of {} consecutive days",
                duration.normalize(),
                restrictions.max_consecutive_days
            ),
        ));
    }

    if let Some(employee) = ctx.employee {
        if employee.on_probation && !restrictions.probation_restrictions.allowed {
            rejections.push(Rejection::policy(
                "leave_type_code",
                format!(
                    "leave type '{}' cannot be taken during probation",
                    config.code()
                ),
            ));
        }
    }

    let same_type = || {
        ctx.booked
            .iter()
            .filter(|b| b.leave_type_code.eq_ignore_ascii_case(config.code()))
    };

    if restrictions.min_gap_between_leaves > 0 {
        let min_gap = i64::from(restrictions.min_gap_between_leaves);
        if let Some(booked) = same_type().find(|b| gap_days(b, from, to).is_some_and(|g| g < min_gap)) {
            rejections.push(Rejection::policy(
                "from_date",
                format!(
                    "leave must be at least {} days apart from the leave booked from {} to {}",
                    min_gap, booked.from_date, booked.to_date
                ),
            ));
        }
    }

    if restrictions.max_requests_per_year > 0 {
        let calendar = config.calendar();
        let year = calendar.leave_year_start(from);
        let taken = same_type()
            .filter(|b| calendar.leave_year_start(b.from_date) == year)
            .count();
        if taken >= restrictions.max_requests_per_year as usize {
            rejections.push(Rejection::policy(
                "from_date",
                format!(
                    "at most {} requests per leave year are allowed, {} already booked",
                    restrictions.max_requests_per_year, taken
                ),
            ));
        }
    }

    rejections
}

fn overlaps(booked: &BookedLeave, from: NaiveDate, to: NaiveDate) -> bool {
    booked.from_date <= to && from <= booked.to_date
}

/// Free days between a booked leave and the requested span, `None` if they overlap.
fn gap_days(booked: &BookedLeave, from: NaiveDate, to: NaiveDate) -> Option<i64> {
    if booked.to_date < from {
        Some((from - booked.to_date).num_days() - 1)
    } else if booked.from_date > to {
        Some((booked.from_date - to).num_days() - 1)
    } else {
        None
    }
}
