//! Maps provider response DTOs.
//!
//! These mirror the provider's JSON. Lists are `#[serde(default)]` because
//! the provider omits them on non-`OK` statuses.

use serde::Deserialize;

use crate::domain::{Coordinate, Place, RouteResult};

use super::error::{MapsError, Operation, check_status};

/// Location wrapper used by every result type.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: Coordinate,
}

/// Response from the geocoding endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,

    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: Option<String>,

    pub geometry: Geometry,
}

/// Response from the nearby search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacesResponse {
    pub status: String,

    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub name: String,

    pub geometry: Geometry,

    #[serde(default)]
    pub place_id: Option<String>,

    #[serde(default)]
    pub vicinity: Option<String>,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub user_ratings_total: Option<u32>,

    #[serde(default)]
    pub types: Vec<String>,
}

/// Response from the directions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,

    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub overview_polyline: OverviewPolyline,

    /// Present when waypoints were sent with `optimize:true`.
    #[serde(default)]
    pub waypoint_order: Option<Vec<usize>>,

    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

impl From<PlaceResult> for Place {
    fn from(result: PlaceResult) -> Self {
        Place {
            name: result.name,
            coordinate: result.geometry.location,
            place_id: result.place_id,
            vicinity: result.vicinity,
            rating: result.rating,
            user_ratings_total: result.user_ratings_total,
            types: result.types,
        }
    }
}

impl GeocodeResponse {
    /// First result's location. Later candidates are ignored.
    pub fn into_coordinate(self) -> Result<Coordinate, MapsError> {
        check_status(&self.status, self.error_message.as_deref())?;
        self.results
            .into_iter()
            .next()
            .map(|r| r.geometry.location)
            .ok_or(MapsError::EmptyResult {
                operation: Operation::Geocode,
            })
    }
}

impl PlacesResponse {
    /// Results in provider order.
    pub fn into_places(self) -> Result<Vec<Place>, MapsError> {
        check_status(&self.status, self.error_message.as_deref())?;
        Ok(self.results.into_iter().map(Place::from).collect())
    }
}

impl DirectionsResponse {
    /// The first route's overview path and waypoint order.
    pub fn into_route(self) -> Result<RouteResult, MapsError> {
        check_status(&self.status, self.error_message.as_deref())?;
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or(MapsError::EmptyResult {
                operation: Operation::Directions,
            })?;

        Ok(RouteResult {
            encoded_path: route.overview_polyline.points,
            waypoint_order: route.waypoint_order,
        })
    }
}
