//! Trip planning pipeline.
//!
//! Takes a validated [`TripRequest`], queries the maps provider for the
//! endpoints, attractions, restaurants, lodging and a route, and assembles
//! the result into a day-by-day [`TripPlan`](crate::domain::TripPlan).

mod assemble;
mod config;
mod error;
mod pipeline;
mod rank;
mod request;

pub use assemble::{
    FALLBACK_FIRST_ACTIVITY, FALLBACK_MEAL, FALLBACK_SECOND_ACTIVITY, FALLBACK_STAY, assemble,
};
pub use config::TripConfig;
pub use error::TripError;
pub use pipeline::TripPlanner;
pub use rank::{sort_by_latitude, take_prefix};
pub use request::{TripRequest, ValidationError};
