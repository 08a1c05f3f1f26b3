//! Application state for the Leave Policy Engine API.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::registry::ConfigurationRegistry;

/// Shared application state.
///
/// Holds the loaded settings and the configuration registry shared by all
/// request handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    registry: Arc<RwLock<ConfigurationRegistry>>,
}

impl AppState {
    /// Creates a new application state with an empty registry.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_registry(config, ConfigurationRegistry::new())
    }

    /// Creates a new application state around an existing registry.
    pub fn with_registry(config: ConfigLoader, registry: ConfigurationRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(RwLock::new(registry)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared configuration registry.
    pub fn registry(&self) -> &RwLock<ConfigurationRegistry> {
        &self.registry
    }
}
