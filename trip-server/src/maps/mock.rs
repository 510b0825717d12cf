//! Mock maps provider for testing and offline development.
//!
//! Serves canned geocodes, place lists and routes, either built in code or
//! loaded from a JSON fixture file, and records every call it receives.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Place, RouteResult};
use crate::polyline;

use super::error::MapsError;
use super::provider::{DirectionsQuery, MapsProvider, NearbyQuery};

/// Status the provider uses when a lookup matches nothing.
const ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Status the provider uses when a route endpoint cannot be found.
const NOT_FOUND: &str = "NOT_FOUND";

/// On-disk fixture format.
///
/// ```json
/// {
///   "geocode": { "Mumbai": { "lat": 19.076, "lng": 72.8777 } },
///   "places": {
///     "restaurants": [
///       { "name": "Gunpowder", "coordinate": { "lat": 15.5, "lng": 73.8 } }
///     ]
///   },
///   "route": { "encoded_path": "_p~iF~ps|U", "waypoint_order": [0] }
/// }
/// ```
///
/// Lookups are case-insensitive. Without a `route`, directions are a
/// straight line through origin, waypoints and destination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockFixture {
    #[serde(default)]
    pub geocode: HashMap<String, Coordinate>,

    /// Search results keyed by keyword.
    #[serde(default)]
    pub places: HashMap<String, Vec<Place>>,

    #[serde(default)]
    pub route: Option<MockRoute>,
}

/// Canned directions result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockRoute {
    pub encoded_path: String,

    #[serde(default)]
    pub waypoint_order: Option<Vec<usize>>,
}

/// A call received by the mock, for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Geocode(String),
    NearbySearch {
        keyword: String,
        radius_meters: u32,
    },
    Directions {
        origin: String,
        destination: String,
        waypoints: Vec<Coordinate>,
        optimize: bool,
    },
}

/// In-memory maps provider.
#[derive(Debug, Clone, Default)]
pub struct MockMapsProvider {
    locations: HashMap<String, Coordinate>,
    places: HashMap<String, Vec<Place>>,
    route: Option<RouteResult>,
    geocode_failures: HashMap<String, String>,
    search_failures: HashMap<String, String>,
    directions_failure: Option<String>,
    geocode_delays: HashMap<String, Duration>,
    search_delays: HashMap<String, Duration>,
    directions_delay: Option<Duration>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockMapsProvider {
    /// Create an empty mock. Every lookup fails with `ZERO_RESULTS`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock serving the contents of a fixture.
    pub fn from_fixture(fixture: MockFixture) -> Self {
        let mut mock = Self::new();
        for (name, coordinate) in fixture.geocode {
            mock = mock.with_location(&name, coordinate);
        }
        for (keyword, places) in fixture.places {
            mock = mock.with_places(&keyword, places);
        }
        if let Some(route) = fixture.route {
            mock.route = Some(RouteResult {
                encoded_path: route.encoded_path,
                waypoint_order: route.waypoint_order,
            });
        }
        mock
    }

    /// Load a fixture from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MapsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            MapsError::InvalidConfig(format!("failed to read fixture {}: {e}", path.display()))
        })?;
        let fixture: MockFixture = serde_json::from_str(&json).map_err(|e| MapsError::Json {
            message: format!("failed to parse fixture {}: {e}", path.display()),
        })?;
        Ok(Self::from_fixture(fixture))
    }

    /// Resolve `name` to `coordinate`.
    pub fn with_location(mut self, name: &str, coordinate: Coordinate) -> Self {
        self.locations.insert(normalize(name), coordinate);
        self
    }

    /// Answer searches for `keyword` with `places`, in this order.
    pub fn with_places(mut self, keyword: &str, places: Vec<Place>) -> Self {
        self.places.insert(normalize(keyword), places);
        self
    }

    /// Answer every directions request with `route`.
    pub fn with_route(mut self, route: RouteResult) -> Self {
        self.route = Some(route);
        self
    }

    /// Make geocoding `name` return `status`.
    pub fn fail_geocode(mut self, name: &str, status: &str) -> Self {
        self.geocode_failures
            .insert(normalize(name), status.to_string());
        self
    }

    /// Make searches for `keyword` return `status`.
    pub fn fail_search(mut self, keyword: &str, status: &str) -> Self {
        self.search_failures
            .insert(normalize(keyword), status.to_string());
        self
    }

    /// Make directions requests return `status`.
    pub fn fail_directions(mut self, status: &str) -> Self {
        self.directions_failure = Some(status.to_string());
        self
    }

    /// Delay geocoding `name` by `delay`.
    pub fn with_geocode_delay(mut self, name: &str, delay: Duration) -> Self {
        self.geocode_delays.insert(normalize(name), delay);
        self
    }

    /// Delay searches for `keyword` by `delay`.
    pub fn with_search_delay(mut self, keyword: &str, delay: Duration) -> Self {
        self.search_delays.insert(normalize(keyword), delay);
        self
    }

    /// Delay directions responses, to exercise timeouts.
    pub fn with_directions_delay(mut self, delay: Duration) -> Self {
        self.directions_delay = Some(delay);
        self
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: MockCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    fn lookup(&self, name: &str) -> Result<Coordinate, MapsError> {
        self.locations
            .get(&normalize(name))
            .copied()
            .ok_or_else(|| MapsError::status(ZERO_RESULTS))
    }
}

#[async_trait]
impl MapsProvider for MockMapsProvider {
    async fn geocode(&self, address: &str) -> Result<Coordinate, MapsError> {
        self.record(MockCall::Geocode(address.to_string()));

        if let Some(delay) = self.geocode_delays.get(&normalize(address)) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(status) = self.geocode_failures.get(&normalize(address)) {
            return Err(MapsError::status(status.as_str()));
        }
        self.lookup(address)
    }

    async fn nearby_search(&self, query: NearbyQuery<'_>) -> Result<Vec<Place>, MapsError> {
        self.record(MockCall::NearbySearch {
            keyword: query.keyword.to_string(),
            radius_meters: query.radius_meters,
        });

        let key = normalize(query.keyword);
        if let Some(delay) = self.search_delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(status) = self.search_failures.get(&key) {
            return Err(MapsError::status(status.as_str()));
        }
        self.places
            .get(&key)
            .cloned()
            .ok_or_else(|| MapsError::status(ZERO_RESULTS))
    }

    async fn directions(&self, query: DirectionsQuery<'_>) -> Result<RouteResult, MapsError> {
        self.record(MockCall::Directions {
            origin: query.origin.to_string(),
            destination: query.destination.to_string(),
            waypoints: query.waypoints.to_vec(),
            optimize: query.optimize,
        });

        if let Some(delay) = self.directions_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(status) = &self.directions_failure {
            return Err(MapsError::status(status.as_str()));
        }
        if let Some(route) = &self.route {
            return Ok(route.clone());
        }

        let origin = self
            .lookup(query.origin)
            .map_err(|_| MapsError::status(NOT_FOUND))?;
        let destination = self
            .lookup(query.destination)
            .map_err(|_| MapsError::status(NOT_FOUND))?;

        let mut path = Vec::with_capacity(query.waypoints.len() + 2);
        path.push(origin);
        path.extend_from_slice(query.waypoints);
        path.push(destination);

        let waypoint_order =
            (query.optimize && !query.waypoints.is_empty()).then(|| (0..query.waypoints.len()).collect());

        Ok(RouteResult {
            encoded_path: polyline::encode(&path),
            waypoint_order,
        })
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}
