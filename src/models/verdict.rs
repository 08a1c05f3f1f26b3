//! Validation verdicts.
//!
//! A validator either accepts a request, returning the normalised payload to
//! forward for submission, or rejects it with one [`Rejection`] per failed
//! check so every offending field can be highlighted at once.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::employee::EmployeeId;
use super::leave_configuration::LeaveUnit;
use super::request::PartialDaySelection;

/// The kind of problem a rejection reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// A field is missing or malformed; the submitter can fix it locally.
    Structural,
    /// The request conflicts with a restriction or the available balance.
    Policy,
}

/// One failed check, tied to the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// The request field at fault.
    pub field: String,
    /// The kind of failure.
    pub kind: RejectionKind,
    /// Message shown to the submitter, with the concrete limit or value.
    pub message: String,
}

impl Rejection {
    /// A structural rejection.
    pub fn structural(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: RejectionKind::Structural,
            message: message.into(),
        }
    }

    /// A policy rejection.
    pub fn policy(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: RejectionKind::Policy,
            message: message.into(),
        }
    }
}

/// The outcome of validating a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict<T> {
    /// The request may be submitted as `payload`.
    Accepted {
        /// The normalised request.
        payload: T,
    },
    /// The request must not be submitted.
    Rejected {
        /// Every failed check.
        reasons: Vec<Rejection>,
    },
}

impl<T> Verdict<T> {
    /// Builds a verdict from collected rejections, accepting if there are none.
    pub fn from_rejections(reasons: Vec<Rejection>, payload: impl FnOnce() -> T) -> Self {
        if reasons.is_empty() {
            Verdict::Accepted { payload: payload() }
        } else {
            Verdict::Rejected { reasons }
        }
    }

    /// Returns true if the request was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }

    /// The accepted payload, if any.
    pub fn payload(&self) -> Option<&T> {
        match self {
            Verdict::Accepted { payload } => Some(payload),
            Verdict::Rejected { .. } => None,
        }
    }

    /// The rejections, empty when accepted.
    pub fn reasons(&self) -> &[Rejection] {
        match self {
            Verdict::Accepted { .. } => &[],
            Verdict::Rejected { reasons } => reasons,
        }
    }
}

/// A leave request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedLeave {
    /// Code of the leave configuration.
    pub leave_type_code: String,
    /// Unit of the request.
    pub category: LeaveUnit,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave (equal to `from_date` for partial leave).
    pub to_date: NaiveDate,
    /// Half of the day, for partial-day leave.
    pub partial_day_selection: Option<PartialDaySelection>,
    /// Window start, for partial-timing leave.
    pub from_time: Option<NaiveTime>,
    /// Window end, for partial-timing leave.
    pub to_time: Option<NaiveTime>,
    /// Days that will be deducted.
    pub duration: Decimal,
    /// Trimmed reason.
    pub reason: String,
    /// Colleagues to notify, without duplicates.
    pub inform_to: Vec<EmployeeId>,
    /// Retroactive entry.
    pub untracked: bool,
    /// Whether an approver must sign off.
    pub requires_approval: bool,
}

/// A credit request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedCredit {
    /// Code of the special leave configuration to credit.
    pub credit_type: String,
    /// First day claimed.
    pub from_date: NaiveDate,
    /// Last day claimed.
    pub to_date: NaiveDate,
    /// Inclusive number of days claimed.
    pub days: Decimal,
    /// Trimmed reason.
    pub reason: String,
    /// Colleagues to notify, without duplicates.
    pub inform_to: Vec<EmployeeId>,
    /// Retroactive entry.
    pub untracked: bool,
}
