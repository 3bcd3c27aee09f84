//! Application state for the employment credit API.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded scheme configuration. It is immutable after startup and
/// shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_shares_config_between_clones() {
        let state = AppState::new(ConfigLoader::load("./config/integrated_employment").unwrap());
        let clone = state.clone();

        assert!(std::ptr::eq(state.config(), clone.config()));
    }
}
