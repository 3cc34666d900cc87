//! Application state for the payslip API.

use std::sync::Arc;

use crate::config::{ConfigLoader, StatutoryConfig};

/// Shared application state.
///
/// Holds the statutory schedule used by every request.
#[derive(Clone)]
pub struct AppState {
    config: Arc<StatutoryConfig>,
}

impl AppState {
    /// Creates application state from a loaded configuration.
    pub fn new(loader: ConfigLoader) -> Self {
        Self::from_config(Arc::new(loader.into_config()))
    }

    /// Creates application state sharing an existing schedule.
    pub fn from_config(config: Arc<StatutoryConfig>) -> Self {
        Self { config }
    }

    /// Returns the statutory schedule.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Returns a shared handle to the statutory schedule.
    pub fn shared_config(&self) -> Arc<StatutoryConfig> {
        Arc::clone(&self.config)
    }
}
