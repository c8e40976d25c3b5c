//! Shared application state for the web server.

use std::sync::Arc;

use cellradar_config::Settings;

/// Shared state injected into every Axum handler. The settings (and the
/// dataset registry inside them) are read-only after startup.
pub struct AppState {
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

pub type SharedState = Arc<AppState>;
