//! Leave configuration lifecycle.
//!
//! The registry creates, updates, assigns, copies and deletes leave
//! configurations. Every change is checked against the configuration
//! invariants before anything is stored.

mod configurations;
mod invariants;

pub use configurations::ConfigurationRegistry;
