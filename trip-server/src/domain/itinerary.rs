//! The assembled trip and its parts.

use super::{Coordinate, Place};

/// Route computed by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Encoded polyline of the whole route, as returned by the provider.
    pub encoded_path: String,

    /// Provider's visiting order for the waypoints, as indices into the
    /// waypoint list that was sent. `None` when the provider gave no order.
    pub waypoint_order: Option<Vec<usize>>,
}

impl RouteResult {
    pub fn new(encoded_path: impl Into<String>) -> Self {
        Self {
            encoded_path: encoded_path.into(),
            waypoint_order: None,
        }
    }

    pub fn with_waypoint_order(mut self, order: Vec<usize>) -> Self {
        self.waypoint_order = Some(order);
        self
    }
}

/// One day of the itinerary.
///
/// Always exactly two activities and one meal; slots with no place data
/// hold a fallback phrase instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    /// 1-based day number.
    pub day_number: u32,
    pub activities: [String; 2],
    pub meal: String,
}

/// A complete day-by-day trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlan {
    pub start_location: String,
    pub destination: String,

    /// One entry per trip day, in order.
    pub days: Vec<DayPlan>,

    /// Lodging line, e.g. "Stay at Hotel X".
    pub stay: String,

    /// Encoded route path, verbatim from the provider.
    pub route: String,

    /// Provider's optimized waypoint order. Not applied to `attractions`.
    pub waypoint_order: Option<Vec<usize>>,

    pub start_coordinate: Coordinate,
    pub destination_coordinate: Coordinate,

    /// Attractions in the order they were sent as route waypoints.
    pub attractions: Vec<Place>,
}
