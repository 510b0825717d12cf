//! Application state for the web layer.

use std::sync::Arc;

use crate::maps::MapsProvider;
use crate::planner::TripConfig;

/// Shared application state.
///
/// Holds no per-request data; every trip is planned from scratch.
#[derive(Clone)]
pub struct AppState {
    /// Maps provider (live client or mock)
    pub maps: Arc<dyn MapsProvider>,

    /// Trip planner configuration
    pub config: Arc<TripConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(maps: impl MapsProvider + 'static, config: TripConfig) -> Self {
        Self {
            maps: Arc::new(maps),
            config: Arc::new(config),
        }
    }
}
