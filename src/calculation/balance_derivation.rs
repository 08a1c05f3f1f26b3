//! Balance derivation.
//!
//! Turns ledger counters into display-ready balances. Every displayed number
//! is rounded to one decimal place (half away from zero). Rounding happens
//! last and only on output; validation always works on the raw ledger.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    BalanceKpis, EmployeeBalanceSummary, LeaveBalance, LeaveCategory, LeaveConfiguration,
    LeaveTypeBalance, PresentationBalance,
};

/// Decimal places shown on presentation balances.
pub const DISPLAY_DECIMAL_PLACES: u32 = 1;

/// Rounds a value for display.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::round_display;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_display(Decimal::from_str("2.25").unwrap()), Decimal::from_str("2.3").unwrap());
/// assert_eq!(round_display(Decimal::from_str("-2.25").unwrap()), Decimal::from_str("-2.3").unwrap());
/// ```
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole` as a percentage, 0 when `whole` is 0.
fn percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

/// Adds counters, failing instead of overflowing.
fn checked_sum(what: &str, values: &[Decimal]) -> EngineResult<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(*value))
        .ok_or_else(|| EngineError::contract(format!("{} overflows", what)))
}

/// Checks that a ledger is internally consistent.
///
/// Counters must be non-negative and their sums representable. An accrued
/// ledger must satisfy `accrued = available + consumed` exactly, and a
/// monetization ledger must not mark more days convertible than are available.
pub fn check_ledger(ledger: &LeaveBalance) -> EngineResult<()> {
    let counters: Vec<(&str, Decimal)> = match ledger {
        LeaveBalance::Flexible { consumed } => vec![("consumed", *consumed)],
        LeaveBalance::Accrued {
            available,
            consumed,
            accrued,
        } => vec![
            ("available", *available),
            ("consumed", *consumed),
            ("accrued", *accrued),
        ],
        LeaveBalance::Special {
            available,
            consumed,
            expired,
        } => vec![
            ("available", *available),
            ("consumed", *consumed),
            ("expired", *expired),
        ],
        LeaveBalance::Monetization {
            available,
            encashable,
            monetizable,
        } => vec![
            ("available", *available),
            ("encashable", *encashable),
            ("monetizable", *monetizable),
        ],
    };

    if let Some((name, value)) = counters.iter().find(|(_, v)| v.is_sign_negative()) {
        return Err(EngineError::contract(format!(
            "{} ledger counter '{}' is negative ({})",
            ledger.category(),
            name,
            value
        )));
    }

    match *ledger {
        LeaveBalance::Accrued {
            available,
            consumed,
            accrued,
        } => {
            let sum = checked_sum("accrued ledger available + consumed", &[available, consumed])?;
            if sum != accrued {
                return Err(EngineError::contract(format!(
                    "accrued ledger has accrued {} but available {} + consumed {}",
                    accrued, available, consumed
                )));
            }
        }
        LeaveBalance::Special {
            available,
            consumed,
            expired,
        } => {
            checked_sum("special ledger total", &[available, consumed, expired])?;
        }
        LeaveBalance::Monetization {
            available,
            encashable,
            monetizable,
        } => {
            let convertible =
                checked_sum("monetization ledger encashable + monetizable", &[encashable, monetizable])?;
            if convertible > available {
                return Err(EngineError::contract(format!(
                    "monetization ledger marks {} encashable + {} monetizable of only {} available",
                    encashable, monetizable, available
                )));
            }
        }
        LeaveBalance::Flexible { .. } => {}
    }
    Ok(())
}

/// Ensures the ledger shape belongs to the configuration's category.
pub(crate) fn ensure_matching_category(
    config: &LeaveConfiguration,
    ledger: &LeaveBalance,
) -> EngineResult<()> {
    if ledger.category() == config.category() {
        return Ok(());
    }
    warn!(
        code = %config.code(),
        configuration = %config.category(),
        ledger = %ledger.category(),
        "Ledger category does not match configuration"
    );
    Err(EngineError::contract(format!(
        "ledger for '{}' is {} but the configuration is {}",
        config.code(),
        ledger.category(),
        config.category()
    )))
}

/// Derives the display-ready balance for one leave type.
///
/// Fails with [`EngineError::ContractViolation`] if the ledger's shape does
/// not match the configuration's category or the ledger is inconsistent.
pub fn derive_balance(
    config: &LeaveConfiguration,
    ledger: &LeaveBalance,
) -> EngineResult<PresentationBalance> {
    ensure_matching_category(config, ledger)?;
    check_ledger(ledger)?;

    let balance = match *ledger {
        LeaveBalance::Flexible { consumed } => PresentationBalance::Flexible {
            consumed: round_display(consumed),
        },
        LeaveBalance::Accrued {
            available,
            consumed,
            accrued,
        } => PresentationBalance::Accrued {
                available: round_display(available),
                consumed: round_display(consumed),
            accrued: round_display(accrued),
            percent_used: round_display(percent(consumed, accrued)),
        },
        LeaveBalance::Special {
            available,
            consumed,
            expired,
        } => {
            let total = checked_sum("special ledger total", &[available, consumed, expired])?;
            PresentationBalance::Special {
                available: round_display(available),
                consumed: round_display(consumed),
                expired: round_display(expired),
                total: round_display(total),
                available_percent: round_display(percent(available, total)),
                consumed_percent: round_display(percent(consumed, total)),
                expired_percent: round_display(percent(expired, total)),
            }
        }
        LeaveBalance::Monetization {
            available,
            encashable,
            monetizable,
        } => {
            let convertible = checked_sum(
                "monetization ledger encashable + monetizable",
                &[encashable, monetizable],
            )?;
            PresentationBalance::Monetization {
                available: round_display(available),
                encashable: round_display(encashable),
                monetizable: round_display(monetizable),
                percent_convertible: round_display(percent(convertible, available)),
            }
        }
    };

    debug!(code = %config.code(), category = %config.category(), "Derived balance");
    Ok(balance)
}

/// Sums ledger figures across an employee's leave types.
///
/// `total_available` skips flexible leave, which has no bounded balance.
/// Encashable and monetizable totals only count monetization leave.
pub fn aggregate_kpis<'a, I>(entries: I) -> EngineResult<BalanceKpis>
where
    I: IntoIterator<Item = (&'a LeaveConfiguration, &'a LeaveBalance)>,
{
    let mut totals = BalanceKpis::default();

    for (config, ledger) in entries {
        ensure_matching_category(config, ledger)?;
        check_ledger(ledger)?;

        if config.category() != LeaveCategory::Flexible {
            totals.total_available = checked_sum(
                "total available",
                &[totals.total_available, ledger.available().unwrap_or_default()],
            )?;
        }
        totals.total_consumed = checked_sum(
            "total consumed",
            &[totals.total_consumed, ledger.consumed().unwrap_or_default()],
        )?;
        if let LeaveBalance::Monetization {
            encashable,
            monetizable,
            ..
        } = *ledger
        {
            totals.total_encashable =
                checked_sum("total encashable", &[totals.total_encashable, encashable])?;
            totals.total_monetizable =
                checked_sum("total monetizable", &[totals.total_monetizable, monetizable])?;
        }
    }

    Ok(BalanceKpis {
        total_available: round_display(totals.total_available),
        total_consumed: round_display(totals.total_consumed),
        total_encashable: round_display(totals.total_encashable),
        total_monetizable: round_display(totals.total_monetizable),
    })
}

fn ledger_key(code: &str) -> String {
    code.trim().to_ascii_lowercase()
}

/// Derives every leave type's balance for one employee.
///
/// `ledger` maps leave codes to counters. Codes match after trimming,
/// ignoring case. A configuration without an entry is shown as an empty
/// balance of its category.
pub fn derive_employee_balances(
    configs: &[LeaveConfiguration],
    ledger: &HashMap<String, LeaveBalance>,
) -> EngineResult<EmployeeBalanceSummary> {
    let by_code: HashMap<String, &LeaveBalance> = ledger
        .iter()
        .map(|(code, counters)| (ledger_key(code), counters))
        .collect();

    let entries: Vec<(&LeaveConfiguration, LeaveBalance)> = configs
        .iter()
        .map(|config| {
            let counters = by_code
                .get(&ledger_key(config.code()))
                .map(|counters| (*counters).clone())
                .unwrap_or_else(|| LeaveBalance::empty(config.category()));
            (config, counters)
        })
        .collect();

    let balances = entries
        .iter()
        .map(|(config, counters)| {
            Ok(LeaveTypeBalance {
                code: config.code().to_string(),
                name: config.carrier.name.clone(),
                balance: derive_balance(config, counters)?,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let kpis = aggregate_kpis(entries.iter().map(|(config, counters)| (*config, counters)))?;

    Ok(EmployeeBalanceSummary { balances, kpis })
}
