//! Configuration loading and management for the Leave Policy Engine.
//!
//! This module provides functionality to load engine settings and the holiday
//! calendar from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Reasons need at least {} characters", config.settings().reason_min_chars);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineSettings, HolidayCalendar, PublicHoliday, ServerSettings};
