//! Leave and credit request models.
//!
//! Requests are transient: they exist only while being validated. Fields the
//! submitter may leave out are `Option`s so that a missing value becomes a
//! rejection rather than a deserialization failure.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::employee::EmployeeId;
use super::leave_configuration::LeaveUnit;

/// Which half of the day a partial-day leave covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialDaySelection {
    /// Morning half.
    FirstHalf,
    /// Afternoon half.
    SecondHalf,
}

/// A candidate leave request, before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Code of the leave configuration being requested.
    pub leave_type_code: String,
    /// Unit of the request.
    pub category: LeaveUnit,
    /// First day of leave.
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    /// Last day of leave, required for full-day leave.
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    /// Half of the day, required for partial-day leave.
    #[serde(default)]
    pub partial_day_selection: Option<PartialDaySelection>,
    /// Start of the window, required for partial-timing leave.
    #[serde(default)]
    pub from_time: Option<NaiveTime>,
    /// End of the window, required for partial-timing leave.
    #[serde(default)]
    pub to_time: Option<NaiveTime>,
    /// Why the leave is needed.
    #[serde(default)]
    pub reason: String,
    /// Colleagues to notify.
    #[serde(default)]
    pub inform_to: Vec<EmployeeId>,
    /// Retroactive entry for a past date.
    #[serde(default)]
    pub untracked: bool,
}

/// A candidate request for additional leave credit (e.g. comp-off).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRequest {
    /// Code of a special-category leave configuration.
    pub credit_type: String,
    /// First day the credit is claimed for.
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    /// Last day the credit is claimed for.
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    /// Why the credit is requested.
    #[serde(default)]
    pub reason: String,
    /// Colleagues to notify.
    #[serde(default)]
    pub inform_to: Vec<EmployeeId>,
    /// Retroactive entry for a past date.
    #[serde(default)]
    pub untracked: bool,
}

/// A leave the employee already has booked, used for gap and frequency rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedLeave {
    /// Code of the leave configuration it was booked against.
    pub leave_type_code: String,
    /// First day (inclusive).
    pub from_date: NaiveDate,
    /// Last day (inclusive).
    pub to_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_full_day_request() {
        let json = r#"{
            "leave_type_code": "AL",
            "category": "full_day",
            "from_date": "2026-11-02",
            "to_date": "2026-11-04",
            "reason": "Family trip to the coast"
        }"#;
        let request: LeaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.category, LeaveUnit::FullDay);
        assert_eq!(request.from_date, NaiveDate::from_ymd_opt(2026, 11, 2));
        assert!(request.partial_day_selection.is_none());
        assert!(request.inform_to.is_empty());
        assert!(!request.untracked);
    }

    #[test]
    fn test_deserialize_partial_timing_request() {
        let json = r#"{
            "leave_type_code": "AL",
            "category": "partial_timing",
            "from_date": "2026-11-02",
            "from_time": "14:00:00",
            "to_time": "16:30:00",
            "reason": "Doctor appointment",
            "inform_to": ["emp_007"]
        }"#;
        let request: LeaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.from_time, NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(request.to_time, NaiveTime::from_hms_opt(16, 30, 0));
        assert_eq!(request.inform_to, vec![EmployeeId::new("emp_007")]);
    }

    #[test]
    fn test_partial_day_selection_serialization() {
        assert_eq!(
            serde_json::to_string(&PartialDaySelection::SecondHalf).unwrap(),
            "\"second_half\""
        );
    }
}
