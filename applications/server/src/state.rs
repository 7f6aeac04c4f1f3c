/// Shared application state
use crate::config::LimitSettings;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub limits: LimitSettings,
}

impl AppState {
    pub fn new(limits: LimitSettings) -> Self {
        Self { limits }
    }
}
