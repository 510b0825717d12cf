//! Web layer for the trip planner.
//!
//! Provides the JSON API consumed by the trip planning UI.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
