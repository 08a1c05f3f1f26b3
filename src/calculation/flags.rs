//! Category-driven policy flags.
//!
//! Choosing a category forces some `allow_*` flags. Flags the category does
//! not force keep the administrator's choice, and so do the allowed units:
//! the category filters those when they are used (see
//! [`LeaveCategory::supports_unit`]). Only the flags change: the policy
//! values themselves are never touched, so re-enabling a flag restores them.

use crate::models::{LeaveCategory, PolicyFlags};

/// Derives the effective flags for `category` from the previously chosen ones.
///
/// | category     | credit | expire | monetization |
/// |--------------|--------|--------|--------------|
/// | accrued      | on     | on     | kept         |
/// | flexible     | off    | off    | kept         |
/// | special      | off    | kept   | kept         |
/// | monetization | on     | on     | on           |
///
/// # Example
///
/// ```
/// use leave_engine::calculation::derive_flags;
/// use leave_engine::models::{LeaveCategory, LeaveUnit, PolicyFlags};
///
/// let flags = derive_flags(LeaveCategory::Accrued, &PolicyFlags::default());
/// assert!(flags.allow_credit_policy);
/// assert!(flags.allow_expire_policy);
/// assert!(flags.allowed_units.contains(&LeaveUnit::PartialTiming));
/// assert!(!LeaveCategory::Accrued.supports_unit(LeaveUnit::PartialTiming));
/// ```
pub fn derive_flags(category: LeaveCategory, previous: &PolicyFlags) -> PolicyFlags {
    let mut flags = previous.clone();

    match category {
        LeaveCategory::Accrued => {
            flags.allow_credit_policy = true;
            flags.allow_expire_policy = true;
        }
        LeaveCategory::Flexible => {
            flags.allow_credit_policy = false;
            flags.allow_expire_policy = false;
        }
        LeaveCategory::Special => {
            flags.allow_credit_policy = false;
        }
        LeaveCategory::Monetization => {
            flags.allow_credit_policy = true;
            flags.allow_expire_policy = true;
            flags.allow_monetization = true;
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeaveUnit;

    fn all_off() -> PolicyFlags {
        PolicyFlags {
            allow_credit_policy: false,
            allow_expire_policy: false,
            allow_monetization: false,
            allow_restrictions: false,
            ..PolicyFlags::default()
        }
    }

    fn all_on() -> PolicyFlags {
        PolicyFlags {
            allow_credit_policy: true,
            allow_expire_policy: true,
            allow_monetization: true,
            allow_restrictions: true,
            ..PolicyFlags::default()
        }
    }

    #[test]
    fn test_accrued_forces_credit_and_expire() {
        let flags = derive_flags(LeaveCategory::Accrued, &all_off());
        assert!(flags.allow_credit_policy);
        assert!(flags.allow_expire_policy);
        assert!(!flags.allow_monetization);
    }

    #[test]
    fn test_flexible_forces_credit_and_expire_off() {
        let flags = derive_flags(LeaveCategory::Flexible, &all_on());
        assert!(!flags.allow_credit_policy);
        assert!(!flags.allow_expire_policy);
        assert!(flags.allow_monetization);
        assert!(flags.allow_restrictions);
        assert!(flags.allowed_units.contains(&LeaveUnit::PartialTiming));
    }

    #[test]
    fn test_special_keeps_expire_choice() {
        let on = derive_flags(LeaveCategory::Special, &all_on());
        assert!(!on.allow_credit_policy);
        assert!(on.allow_expire_policy);

        let off = derive_flags(LeaveCategory::Special, &all_off());
        assert!(!off.allow_expire_policy);
    }

    #[test]
    fn test_monetization_forces_all_three() {
        let flags = derive_flags(LeaveCategory::Monetization, &all_off());
        assert!(flags.allow_credit_policy);
        assert!(flags.allow_expire_policy);
        assert!(flags.allow_monetization);
        assert!(!flags.allow_restrictions);
    }

    #[test]
    fn test_restrictions_flag_never_forced() {
        for category in [
            LeaveCategory::Flexible,
            LeaveCategory::Accrued,
            LeaveCategory::Special,
            LeaveCategory::Monetization,
        ] {
            assert!(derive_flags(category, &all_on()).allow_restrictions);
            assert!(!derive_flags(category, &all_off()).allow_restrictions);
        }
    }

    #[test]
    fn test_special_to_accrued_flips_expire_on() {
        let special = derive_flags(LeaveCategory::Special, &all_off());
        let accrued = derive_flags(LeaveCategory::Accrued, &special);
        assert!(accrued.allow_expire_policy);
    }

    #[test]
    fn test_partial_timing_survives_a_round_trip_through_accrued() {
        let flexible = derive_flags(LeaveCategory::Flexible, &PolicyFlags::default());
        let accrued = derive_flags(LeaveCategory::Accrued, &flexible);
        let back = derive_flags(LeaveCategory::Flexible, &accrued);

        assert_eq!(back.allowed_units, flexible.allowed_units);
        assert!(
            back.effective_units(LeaveCategory::Flexible)
                .contains(&LeaveUnit::PartialTiming)
        );
        assert!(
            !accrued
                .effective_units(LeaveCategory::Accrued)
                .contains(&LeaveUnit::PartialTiming)
        );
    }

    #[test]
    fn test_derivation_is_idempotent() {
        for category in [
            LeaveCategory::Flexible,
            LeaveCategory::Accrued,
            LeaveCategory::Special,
            LeaveCategory::Monetization,
        ] {
            let once = derive_flags(category, &all_on());
            assert_eq!(derive_flags(category, &once), once);
        }
    }
}
