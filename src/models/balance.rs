//! Leave balance models.
//!
//! [`LeaveBalance`] is the backend ledger for one employee and one leave type.
//! Each variant only carries the counters meaningful for its category.
//! [`PresentationBalance`] and [`BalanceKpis`] are the rounded, display-ready
//! values derived from it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::leave_configuration::LeaveCategory;

/// Ledger counters for one leave type, in days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum LeaveBalance {
    /// Unbounded leave: only consumption is tracked.
    Flexible {
        /// Days consumed.
        consumed: Decimal,
    },
    /// Accrued leave. `accrued` always equals `available + consumed`.
    Accrued {
        /// Days still available.
        available: Decimal,
        /// Days consumed.
        consumed: Decimal,
        /// Days accrued in total.
        accrued: Decimal,
    },
    /// Special leave. The three counters partition the total granted.
    Special {
        /// Days still available.
        available: Decimal,
        /// Days consumed.
        consumed: Decimal,
        /// Days that expired unused.
        expired: Decimal,
    },
    /// Monetizable leave. `encashable + monetizable` never exceeds `available`.
    Monetization {
        /// Days still available.
        available: Decimal,
        /// Days eligible for encashment.
        encashable: Decimal,
        /// Days eligible for other monetary conversion.
        monetizable: Decimal,
    },
}

impl LeaveBalance {
    /// An all-zero ledger of the given category.
    pub fn empty(category: LeaveCategory) -> Self {
        match category {
            LeaveCategory::Flexible => LeaveBalance::Flexible {
                consumed: Decimal::ZERO,
            },
            LeaveCategory::Accrued => LeaveBalance::Accrued {
                available: Decimal::ZERO,
                consumed: Decimal::ZERO,
                accrued: Decimal::ZERO,
            },
            LeaveCategory::Special => LeaveBalance::Special {
                available: Decimal::ZERO,
                consumed: Decimal::ZERO,
                expired: Decimal::ZERO,
            },
            LeaveCategory::Monetization => LeaveBalance::Monetization {
                available: Decimal::ZERO,
                encashable: Decimal::ZERO,
                monetizable: Decimal::ZERO,
            },
        }
    }

    /// The category this ledger shape belongs to.
    pub fn category(&self) -> LeaveCategory {
        match self {
            LeaveBalance::Flexible { .. } => LeaveCategory::Flexible,
            LeaveBalance::Accrued { .. } => LeaveCategory::Accrued,
            LeaveBalance::Special { .. } => LeaveCategory::Special,
            LeaveBalance::Monetization { .. } => LeaveCategory::Monetization,
        }
    }

    /// Days available, or `None` for flexible leave which has no ceiling.
    pub fn available(&self) -> Option<Decimal> {
        match self {
            LeaveBalance::Flexible { .. } => None,
            LeaveBalance::Accrued { available, .. }
            | LeaveBalance::Special { available, .. }
            | LeaveBalance::Monetization { available, .. } => Some(*available),
        }
    }

    /// Days consumed, or `None` for monetization leave which does not track it.
    pub fn consumed(&self) -> Option<Decimal> {
        match self {
            LeaveBalance::Flexible { consumed }
            | LeaveBalance::Accrued { consumed, .. }
            | LeaveBalance::Special { consumed, .. } => Some(*consumed),
            LeaveBalance::Monetization { .. } => None,
        }
    }
}

/// Display-ready balance for one leave type.
///
/// All values are rounded to one decimal place; percentages are in the
/// range 0 to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum PresentationBalance {
    /// Flexible leave.
    Flexible {
        /// Days consumed.
        consumed: Decimal,
    },
    /// Accrued leave.
    Accrued {
        /// Days still available.
        available: Decimal,
        /// Days consumed.
        consumed: Decimal,
        /// `available + consumed`.
        accrued: Decimal,
        /// Share of the accrued total already consumed.
        percent_used: Decimal,
    },
    /// Special leave.
    Special {
        /// Days still available.
        available: Decimal,
        /// Days consumed.
        consumed: Decimal,
        /// Days expired.
        expired: Decimal,
        /// Sum of the three counters.
        total: Decimal,
        /// Share of the total still available.
        available_percent: Decimal,
        /// Share of the total consumed.
        consumed_percent: Decimal,
        /// Share of the total expired.
        expired_percent: Decimal,
    },
    /// Monetization leave.
    Monetization {
        /// Days still available.
        available: Decimal,
        /// Days eligible for encashment.
        encashable: Decimal,
        /// Days eligible for other conversion.
        monetizable: Decimal,
        /// Share of the available balance that can be converted.
        percent_convertible: Decimal,
    },
}

/// Aggregate figures across all of an employee's leave types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceKpis {
    /// Available days across every non-flexible leave type.
    pub total_available: Decimal,
    /// Consumed days across every leave type that tracks consumption.
    pub total_consumed: Decimal,
    /// Encashable days across monetization leave types.
    pub total_encashable: Decimal,
    /// Monetizable days across monetization leave types.
    pub total_monetizable: Decimal,
}

/// Presentation balance for one leave type, keyed by its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTypeBalance {
    /// The leave code.
    pub code: String,
    /// The leave name.
    pub name: String,
    /// The derived balance.
    pub balance: PresentationBalance,
}

/// Every presentation balance for one employee plus the aggregate figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeBalanceSummary {
    /// Per leave type balances, in configuration order.
    pub balances: Vec<LeaveTypeBalance>,
    /// Aggregate figures.
    pub kpis: BalanceKpis,
}
