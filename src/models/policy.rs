//! Policy value objects.
//!
//! Each type describes one facet of how a leave type behaves: crediting,
//! expiry, monetization, restrictions and the leave calendar. They carry no
//! state beyond their fields; `validate` reports one [`FieldError`] per
//! invalid field and never panics on bad input.

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Upper bound for any per-year day count in [`Restrictions`].
pub const MAX_DAYS_IN_YEAR: u32 = 366;

/// How often leave is credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditFrequency {
    /// Credited at the start of every leave month.
    Monthly,
    /// Credited at the start of every leave year.
    Yearly,
    /// Credited every three months.
    Quarterly,
    /// Credited on the dates listed in `custom_dates`.
    Custom,
}

/// How leave is credited to employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPolicy {
    /// Whether employees can request credit on demand.
    #[serde(default)]
    pub on_demand_credit: bool,
    /// Days credited per cycle.
    pub value: Decimal,
    /// The credit cycle.
    pub frequency: CreditFrequency,
    /// Credit dates, required when `frequency` is `custom`.
    #[serde(default)]
    pub custom_dates: Vec<NaiveDate>,
    /// Ceiling on the credited balance, zero meaning unlimited.
    #[serde(default)]
    pub max_limit: Decimal,
}

impl CreditPolicy {
    /// Validates the policy fields.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.value.is_sign_negative() {
            errors.push(FieldError::new("value", "must not be negative"));
        }
        if self.max_limit.is_sign_negative() {
            errors.push(FieldError::new("max_limit", "must not be negative"));
        } else if self.max_limit > Decimal::ZERO && self.value > self.max_limit {
            errors.push(FieldError::new(
                "value",
                format!(
                    "credit of {} days exceeds the limit of {} days",
                    self.value.normalize(),
                    self.max_limit.normalize()
                ),
            ));
        }
        if self.frequency == CreditFrequency::Custom && self.custom_dates.is_empty() {
            errors.push(FieldError::new(
                "custom_dates",
                "at least one date is required for a custom credit frequency",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Returns the days that can be credited on top of `current` without
    /// passing `max_limit`.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::{CreditFrequency, CreditPolicy};
    /// use rust_decimal::Decimal;
    ///
    /// let policy = CreditPolicy {
    ///     on_demand_credit: false,
    ///     value: Decimal::from(2),
    ///     frequency: CreditFrequency::Monthly,
    ///     custom_dates: vec![],
    ///     max_limit: Decimal::from(10),
    /// };
    /// assert_eq!(policy.capped_credit(Decimal::from(9)), Decimal::from(1));
    /// ```
    pub fn capped_credit(&self, current: Decimal) -> Decimal {
        if self.max_limit.is_zero() {
            return self.value;
        }
        let headroom = (self.max_limit - current).max(Decimal::ZERO);
        self.value.min(headroom)
    }
}

/// When unused leave expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpireFrequency {
    /// Expires at the start of the next leave month.
    Monthly,
    /// Expires a fixed number of days after it was credited.
    AfterCredit,
    /// Expires at the start of the next leave year.
    Yearly,
    /// Expires on the dates listed in `custom_dates`.
    Custom,
}

/// How unused leave expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirePolicy {
    /// Unused leave carries forward and never expires.
    #[serde(default)]
    pub carry_forward: bool,
    /// The expiry cycle, ignored when `carry_forward` is set.
    pub expire_frequency: ExpireFrequency,
    /// Days after crediting at which leave expires (`after_credit` only).
    #[serde(default)]
    pub after_credit_expiry_days: u32,
    /// Expiry dates, required when `expire_frequency` is `custom`.
    #[serde(default)]
    pub custom_dates: Vec<NaiveDate>,
}

impl ExpirePolicy {
    /// Validates the policy fields.
    ///
    /// A carried-forward balance never expires, so the frequency fields are
    /// not checked in that case.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        if self.carry_forward {
            return Ok(());
        }

        let mut errors = Vec::new();
        match self.expire_frequency {
            ExpireFrequency::AfterCredit if self.after_credit_expiry_days == 0 => {
                errors.push(FieldError::new(
                    "after_credit_expiry_days",
                    "must be greater than zero when leave expires after credit",
                ));
            }
            ExpireFrequency::Custom if self.custom_dates.is_empty() => {
                errors.push(FieldError::new(
                    "custom_dates",
                    "at least one date is required for a custom expiry frequency",
                ));
            }
            _ => {}
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Returns true if balances under this policy can expire at all.
    pub fn expires(&self) -> bool {
        !self.carry_forward
    }

    /// Returns the date on which leave credited on `credit_date` expires.
    ///
    /// Monthly and yearly expiry follow the leave calendar. Returns `None`
    /// when the balance is carried forward or no later custom date exists.
    pub fn next_expiry_after(
        &self,
        credit_date: NaiveDate,
        calendar: &CalendarConfiguration,
    ) -> Option<NaiveDate> {
        if !self.expires() {
            return None;
        }
        match self.expire_frequency {
            ExpireFrequency::Monthly => calendar.next_leave_month_start(credit_date),
            ExpireFrequency::Yearly => calendar.next_leave_year_start(credit_date),
            ExpireFrequency::AfterCredit => {
                credit_date.checked_add_days(Days::new(u64::from(self.after_credit_expiry_days)))
            }
            ExpireFrequency::Custom => self
                .custom_dates
                .iter()
                .filter(|d| **d > credit_date)
                .min()
                .copied(),
        }
    }
}

/// How much of a balance can be converted to cash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetizationPolicy {
    /// Number of encashment requests allowed per leave year.
    pub encashable_count: u32,
    /// Ceiling on days that can be cashed out.
    pub encashable_limit: Decimal,
}

impl MonetizationPolicy {
    /// Validates the policy fields.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.encashable_limit.is_sign_negative() {
            errors.push(FieldError::new("encashable_limit", "must not be negative"));
        } else if self.encashable_count > 0 && self.encashable_limit.is_zero() {
            errors.push(FieldError::new(
                "encashable_limit",
                "must be greater than zero when encashment is allowed",
            ));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Returns the days of `available` that may be cashed out.
    pub fn cash_out_ceiling(&self, available: Decimal) -> Decimal {
        available.max(Decimal::ZERO).min(self.encashable_limit)
    }
}

/// Probation-specific restrictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbationRestrictions {
    /// Whether employees on probation may take this leave.
    #[serde(default)]
    pub allowed: bool,
}

/// Limits on how a leave type can be requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restrictions {
    /// Requests need approval before they take effect.
    pub approval_required: bool,
    /// Longest single leave in days, zero meaning unbounded.
    pub max_consecutive_days: u32,
    /// Minimum number of days between two leaves.
    pub min_gap_between_leaves: u32,
    /// Most requests per leave year, zero meaning unbounded.
    pub max_requests_per_year: u32,
    /// Weekends and holidays inside a leave count towards its duration.
    pub include_holidays_weekends: bool,
    /// Probation rules.
    pub probation_restrictions: ProbationRestrictions,
}

impl Restrictions {
    /// Validates the restriction fields.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let bounded = [
            ("max_consecutive_days", self.max_consecutive_days),
            ("min_gap_between_leaves", self.min_gap_between_leaves),
            ("max_requests_per_year", self.max_requests_per_year),
        ];
        for (field, value) in bounded {
            if value > MAX_DAYS_IN_YEAR {
                errors.push(FieldError::new(
                    field,
                    format!("must be at most {}", MAX_DAYS_IN_YEAR),
                ));
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Whether a leave month or year follows the calendar or a custom start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// Calendar months and years.
    #[default]
    Standard,
    /// Months start on `start_day`, years on `start_month`.
    Custom,
}

/// The leave calendar: where leave months and leave years begin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfiguration {
    /// Month type.
    pub month_type: PeriodType,
    /// First day of a leave month (1..=31, locked to 1 for standard).
    pub start_day: u32,
    /// Year type.
    pub year_type: PeriodType,
    /// First month of a leave year (1..=12, locked to 1 for standard).
    pub start_month: u32,
}

impl Default for CalendarConfiguration {
    fn default() -> Self {
        Self {
            month_type: PeriodType::Standard,
            start_day: 1,
            year_type: PeriodType::Standard,
            start_month: 1,
        }
    }
}

impl CalendarConfiguration {
    /// Validates the calendar fields.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if !(1..=31).contains(&self.start_day) {
            errors.push(FieldError::new("start_day", "must be between 1 and 31"));
        } else if self.month_type == PeriodType::Standard && self.start_day != 1 {
            errors.push(FieldError::new(
                "start_day",
                "is locked to 1 for standard months",
            ));
        }

        if !(1..=12).contains(&self.start_month) {
            errors.push(FieldError::new("start_month", "must be between 1 and 12"));
        } else if self.year_type == PeriodType::Standard && self.start_month != 1 {
            errors.push(FieldError::new(
                "start_month",
                "is locked to 1 for standard years",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn effective_start_day(&self) -> u32 {
        match self.month_type {
            PeriodType::Standard => 1,
            PeriodType::Custom => self.start_day,
        }
    }

    fn effective_start_month(&self) -> u32 {
        match self.year_type {
            PeriodType::Standard => 1,
            PeriodType::Custom => self.start_month,
        }
    }

    /// Returns the first day of the leave month containing `date`.
    pub fn leave_month_start(&self, date: NaiveDate) -> Option<NaiveDate> {
        let day = self.effective_start_day();
        let this_month = clamped_date(date.year(), date.month(), day)?;
        if date >= this_month {
            return Some(this_month);
        }
        let (year, month) = previous_month(date.year(), date.month());
        clamped_date(year, month, day)
    }

    /// Returns the first day of the leave month after the one containing `date`.
    pub fn next_leave_month_start(&self, date: NaiveDate) -> Option<NaiveDate> {
        let current = self.leave_month_start(date)?;
        let (year, month) = following_month(current.year(), current.month());
        clamped_date(year, month, self.effective_start_day())
    }

    /// Returns the first day of the leave year containing `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::{CalendarConfiguration, PeriodType};
    /// use chrono::NaiveDate;
    ///
    /// let fiscal = CalendarConfiguration {
    ///     month_type: PeriodType::Standard,
    ///     start_day: 1,
    ///     year_type: PeriodType::Custom,
    ///     start_month: 4,
    /// };
    /// let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
    /// assert_eq!(fiscal.leave_year_start(date), NaiveDate::from_ymd_opt(2025, 4, 1));
    /// ```
    pub fn leave_year_start(&self, date: NaiveDate) -> Option<NaiveDate> {
        let month = self.effective_start_month();
        let day = self.effective_start_day();
        let this_year = clamped_date(date.year(), month, day)?;
        if date >= this_year {
            Some(this_year)
        } else {
            clamped_date(date.year() - 1, month, day)
        }
    }

    /// Returns the first day of the leave year after the one containing `date`.
    pub fn next_leave_year_start(&self, date: NaiveDate) -> Option<NaiveDate> {
        let current = self.leave_year_start(date)?;
        clamped_date(
            current.year() + 1,
            self.effective_start_month(),
            self.effective_start_day(),
        )
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

fn following_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

/// Builds a date, moving days past the end of the month back to its last day.
fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        let (next_year, next_month) = following_month(year, month);
        NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
    })
}
