//! Application state for the upload API

use std::sync::Arc;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone, Default)]
pub struct AppState {
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
