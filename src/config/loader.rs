//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings
//! and the holiday calendar from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineSettings, HolidayCalendar};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml     # Engine settings (required)
/// └── holidays.yaml   # Public holidays (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Half-day leave counts as {} days", loader.settings().partial_day_units);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    settings: EngineSettings,
    holidays: HolidayCalendar,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `engine.yaml` is missing or if any present file
    /// contains invalid YAML. A missing `holidays.yaml` yields an empty
    /// holiday calendar.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;

        let holidays_path = path.join("holidays.yaml");
        let holidays = if holidays_path.exists() {
            Self::load_yaml::<HolidayCalendar>(&holidays_path)?
        } else {
            HolidayCalendar::default()
        };

        debug!(
            path = %path.display(),
            holidays = holidays.holidays.len(),
            "Loaded engine configuration"
        );

        Ok(Self { settings, holidays })
    }

    /// Builds a loader from values already in memory.
    pub fn from_parts(settings: EngineSettings, holidays: HolidayCalendar) -> Self {
        Self { settings, holidays }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }
}
