//! Attraction ordering.
//!
//! Attractions are visited south to north: a cheap geographic grouping so
//! that consecutive days tend to cover nearby places. This is not a tour
//! optimization; the provider may still reorder the route's waypoints.

use crate::domain::Place;

/// Keep the first `limit` places, in the order given.
pub fn take_prefix(mut places: Vec<Place>, limit: usize) -> Vec<Place> {
    places.truncate(limit);
    places
}

/// Sort places by ascending latitude.
///
/// The sort is stable, so places at the same latitude keep their provider
/// order.
pub fn sort_by_latitude(mut places: Vec<Place>) -> Vec<Place> {
    places.sort_by(|a, b| a.coordinate.latitude().total_cmp(&b.coordinate.latitude()));
    places
}
