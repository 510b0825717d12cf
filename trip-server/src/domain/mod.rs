//! Domain types for the trip planner.
//!
//! Values here are validated at construction, so code receiving them can
//! rely on their invariants (e.g. a `Coordinate` is always in range and a
//! `DayPlan` always has two activities).

mod coordinate;
mod itinerary;
mod place;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use itinerary::{DayPlan, RouteResult, TripPlan};
pub use place::Place;
