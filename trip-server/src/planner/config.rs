//! Trip planning configuration.

use std::time::Duration;

/// Configuration parameters for trip planning.
#[derive(Debug, Clone)]
pub struct TripConfig {
    /// Radius around the destination for all place searches (metres).
    pub search_radius_m: u32,

    /// Attraction keyword used when the request has no preferences.
    pub attraction_keyword: String,

    /// Keyword for meal suggestions.
    pub restaurant_keyword: String,

    /// Keyword for the lodging suggestion.
    pub lodging_keyword: String,

    /// Deadline for each geocode and place search call (seconds).
    pub lookup_timeout_secs: u64,

    /// Deadline for the directions call (seconds).
    pub directions_timeout_secs: u64,

    /// Longest trip accepted, in days. Bounds the per-day allocations.
    pub max_duration_days: u32,
}

impl TripConfig {
    /// Returns the lookup deadline as a Duration.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    /// Returns the directions deadline as a Duration.
    pub fn directions_timeout(&self) -> Duration {
        Duration::from_secs(self.directions_timeout_secs)
    }
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            search_radius_m: 50_000,
            attraction_keyword: "tourist attractions".to_string(),
            restaurant_keyword: "restaurants".to_string(),
            lodging_keyword: "hotels".to_string(),
            lookup_timeout_secs: 10,
            directions_timeout_secs: 10,
            max_duration_days: 365,
        }
    }
}
