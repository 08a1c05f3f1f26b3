//! Configuration types for the Leave Policy Engine.
//!
//! This module contains the strongly-typed settings structures that are
//! deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Address the HTTP adapter listens on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Engine-wide settings from `engine.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Days deducted for a partial-day (half-day) leave.
    pub partial_day_units: Decimal,
    /// Days deducted for a partial-timing leave.
    pub partial_timing_units: Decimal,
    /// Shortest accepted reason, in characters.
    pub reason_min_chars: usize,
    /// Longest accepted reason, in characters.
    pub reason_max_chars: usize,
    /// HTTP adapter address.
    pub server: ServerSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            partial_day_units: Decimal::new(5, 1),
            partial_timing_units: Decimal::new(25, 2),
            reason_min_chars: 10,
            reason_max_chars: 500,
            server: ServerSettings::default(),
        }
    }
}

/// A public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
    /// Where the holiday applies (e.g. "national").
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "national".to_string()
}

/// Holidays from `holidays.yaml`, excluded from leave durations unless a
/// leave type counts holidays and weekends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    /// Every known holiday.
    #[serde(default)]
    pub holidays: Vec<PublicHoliday>,
}

impl HolidayCalendar {
    /// Checks if a given date is a holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.iter().any(|h| h.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = EngineSettings::default();
        assert_eq!(settings.partial_day_units, Decimal::new(5, 1));
        assert_eq!(settings.partial_timing_units, Decimal::new(25, 2));
        assert_eq!(settings.reason_min_chars, 10);
        assert_eq!(settings.reason_max_chars, 500);
    }

    #[test]
    fn test_partial_settings_yaml_fills_defaults() {
        let yaml = "partial_timing_units: \"0.125\"\n";
        let settings: EngineSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.partial_timing_units, Decimal::new(125, 3));
        assert_eq!(settings.partial_day_units, Decimal::new(5, 1));
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_holiday_region_defaults_to_national() {
        let yaml = "holidays:\n  - date: 2026-12-25\n    name: Christmas Day\n";
        let calendar: HolidayCalendar = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(calendar.holidays[0].region, "national");
        assert!(calendar.is_holiday(NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()));
        assert!(!calendar.is_holiday(NaiveDate::from_ymd_opt(2026, 12, 24).unwrap()));
    }
}
