//! Day detection and leave-span counting.
//!
//! This module classifies calendar days as working days, weekends or holidays
//! and counts how many days of a leave span are deducted from a balance.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::HolidayCalendar;

/// The type of a calendar day for leave counting.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::{get_day_type, DayType};
/// use leave_engine::config::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let holidays = HolidayCalendar::default();
/// // 2026-01-17 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
/// assert_eq!(get_day_type(saturday, &holidays), DayType::Weekend);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday, not a holiday.
    Working,
    /// Saturday or Sunday.
    Weekend,
    /// A listed public holiday falling on a weekday.
    Holiday,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Working => write!(f, "Working day"),
            DayType::Weekend => write!(f, "Weekend"),
            DayType::Holiday => write!(f, "Holiday"),
        }
    }
}

/// Determines the day type for a given date.
///
/// Weekends take precedence over holidays, so a holiday on a Saturday is a
/// [`DayType::Weekend`].
pub fn get_day_type(date: NaiveDate, holidays: &HolidayCalendar) -> DayType {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayType::Weekend,
        _ if holidays.is_holiday(date) => DayType::Holiday,
        _ => DayType::Working,
    }
}

/// Counts the days of an inclusive leave span that are deducted from a balance.
///
/// When `include_non_working` is true every calendar day counts; otherwise
/// weekends and holidays are skipped. Returns 0 when `to` is before `from`.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::count_leave_days;
/// use leave_engine::config::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let holidays = HolidayCalendar::default();
/// // Friday 2026-01-16 to Monday 2026-01-19
/// let from = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
/// let to = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
/// assert_eq!(count_leave_days(from, to, false, &holidays), 2);
/// assert_eq!(count_leave_days(from, to, true, &holidays), 4);
/// ```
pub fn count_leave_days(
    from: NaiveDate,
    to: NaiveDate,
    include_non_working: bool,
    holidays: &HolidayCalendar,
) -> u32 {
    if to < from {
        return 0;
    }
    let days = from
        .iter_days()
        .take_while(|d| *d <= to)
        .filter(|d| include_non_working || get_day_type(*d, holidays) == DayType::Working)
        .count();
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Counts the calendar days of an inclusive span.
pub fn span_days(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days() + 1
}
