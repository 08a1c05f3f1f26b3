//! Checks shared by the leave and credit request validators.

use chrono::NaiveDate;

use crate::config::{EngineSettings, HolidayCalendar};
use crate::models::{BookedLeave, EmployeeId, EmployeeProfile, MAX_DAYS_IN_YEAR, Rejection};

use super::day_detection::span_days;

/// Everything a validator needs besides the request itself.
///
/// `today` is passed in rather than read from the clock so that validation
/// stays a pure function of its inputs.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// The current date.
    pub today: NaiveDate,
    /// Engine settings (partial units, reason bounds).
    pub settings: &'a EngineSettings,
    /// Holidays excluded from durations.
    pub holidays: &'a HolidayCalendar,
    /// The requesting employee, when known.
    pub employee: Option<&'a EmployeeProfile>,
    /// Leaves the employee already has booked.
    pub booked: &'a [BookedLeave],
}

impl<'a> ValidationContext<'a> {
    /// Creates a context without employee details or booking history.
    pub fn new(
        today: NaiveDate,
        settings: &'a EngineSettings,
        holidays: &'a HolidayCalendar,
    ) -> Self {
        Self {
            today,
            settings,
            holidays,
            employee: None,
            booked: &[],
        }
    }

    /// Adds the requesting employee's profile.
    pub fn with_employee(mut self, employee: &'a EmployeeProfile) -> Self {
        self.employee = Some(employee);
        self
    }

    /// Adds the employee's booked leaves.
    pub fn with_booked(mut self, booked: &'a [BookedLeave]) -> Self {
        self.booked = booked;
        self
    }
}

/// Checks the reason length against the configured bounds.
pub(crate) fn check_reason(reason: &str, settings: &EngineSettings) -> Option<Rejection> {
    let length = reason.trim().chars().count();
    if length < settings.reason_min_chars {
        Some(Rejection::structural(
            "reason",
            format!(
                "reason must be at least {} characters, got {}",
                settings.reason_min_chars, length
            ),
        ))
    } else if length > settings.reason_max_chars {
        Some(Rejection::structural(
            "reason",
            format!(
                "reason must be at most {} characters, got {}",
                settings.reason_max_chars, length
            ),
        ))
    } else {
        None
    }
}

/// Checks that a full date range is present and ordered.
pub(crate) fn check_date_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    rejections: &mut Vec<Rejection>,
) {
    if from.is_none() {
        rejections.push(Rejection::structural("from_date", "from_date is required"));
    }
    match (from, to) {
        (_, None) => rejections.push(Rejection::structural("to_date", "to_date is required")),
        (Some(from), Some(to)) if to < from => rejections.push(Rejection::structural(
            "to_date",
            format!("to_date {} is before from_date {}", to, from),
        )),
        (Some(from), Some(to)) => rejections.extend(check_span_length(from, to)),
        _ => {}
    }
}

/// Rejects a span longer than a leave year, before any day is counted.
pub(crate) fn check_span_length(from: NaiveDate, to: NaiveDate) -> Option<Rejection> {
    let days = span_days(from, to);
    (days > i64::from(MAX_DAYS_IN_YEAR)).then(|| {
        Rejection::structural(
            "to_date",
            format!(
                "span of {} days exceeds the maximum of {} days",
                days, MAX_DAYS_IN_YEAR
            ),
        )
    })
}

/// Rejects a start date in the past unless the entry is retroactive.
pub(crate) fn check_not_past(
    from: NaiveDate,
    today: NaiveDate,
    untracked: bool,
) -> Option<Rejection> {
    if from < today && !untracked {
        Some(Rejection::structural(
            "from_date",
            format!(
                "from_date {} is in the past; mark the entry as untracked to record past leave",
                from
            ),
        ))
    } else {
        None
    }
}

/// Removes repeated recipients, keeping the first occurrence.
pub(crate) fn dedup_recipients(inform_to: &[EmployeeId]) -> Vec<EmployeeId> {
    let mut seen = std::collections::HashSet::new();
    inform_to
        .iter()
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}
