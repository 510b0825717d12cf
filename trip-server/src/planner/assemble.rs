//! Itinerary assembly.
//!
//! Turns the places found for a trip into a day-by-day plan. Missing data
//! never fails assembly: each empty slot gets a fixed fallback phrase.

use crate::domain::{Coordinate, DayPlan, Place, RouteResult, TripPlan};

use super::request::TripRequest;

/// First activity of a day with no attraction for it.
pub const FALLBACK_FIRST_ACTIVITY: &str = "Explore a local spot";

/// Second activity of a day with no attraction for it.
pub const FALLBACK_SECOND_ACTIVITY: &str = "Relax or explore more";

/// Meal for a day with no restaurant for it.
pub const FALLBACK_MEAL: &str = "Try local cuisine";

/// Lodging when no hotel was found.
pub const FALLBACK_STAY: &str = "Find local lodging";

/// Build the final plan.
///
/// Day `i` (0-based) gets attractions `2i` and `2i + 1` and restaurant `i`.
/// `attractions` is stored in the plan in the order given, which must be
/// the order its coordinates were sent to the route finder.
pub fn assemble(
    request: &TripRequest,
    start: Coordinate,
    destination: Coordinate,
    attractions: Vec<Place>,
    restaurants: &[Place],
    lodging: Option<&Place>,
    route: RouteResult,
) -> TripPlan {
    let days = (0..request.duration_days)
        .map(|day| plan_day(day, &attractions, restaurants))
        .collect();

    let stay = phrase("Stay at", lodging, FALLBACK_STAY);

    TripPlan {
        start_location: request.start_location.clone(),
        destination: request.destination.clone(),
        days,
        stay,
        route: route.encoded_path,
        waypoint_order: route.waypoint_order,
        start_coordinate: start,
        destination_coordinate: destination,
        attractions,
    }
}

fn plan_day(day: u32, attractions: &[Place], restaurants: &[Place]) -> DayPlan {
    let index = day as usize;
    let first = attractions.get(index * 2);
    let second = attractions.get(index * 2 + 1);

    DayPlan {
        day_number: day + 1,
        activities: [
            phrase("Visit", first, FALLBACK_FIRST_ACTIVITY),
            phrase("Visit", second, FALLBACK_SECOND_ACTIVITY),
        ],
        meal: phrase("Dine at", restaurants.get(index), FALLBACK_MEAL),
    }
}

/// "{verb} {name}", or `fallback` when there is no named place.
fn phrase(verb: &str, place: Option<&Place>, fallback: &str) -> String {
    match place.and_then(Place::display_name) {
        Some(name) => format!("{verb} {name}"),
        None => fallback.to_string(),
    }
}
