//! The provider seam used by the trip planner.

use async_trait::async_trait;

use crate::domain::{Coordinate, Place, RouteResult};

use super::error::MapsError;

/// Parameters for a nearby place search.
#[derive(Debug, Clone, Copy)]
pub struct NearbyQuery<'a> {
    pub center: Coordinate,
    pub radius_meters: u32,
    /// Category keyword, e.g. "restaurants".
    pub keyword: &'a str,
}

/// Parameters for a directions request.
#[derive(Debug, Clone, Copy)]
pub struct DirectionsQuery<'a> {
    /// Free-text origin, passed to the provider as typed by the user.
    pub origin: &'a str,
    pub destination: &'a str,
    /// Intermediate stops, in the order we would like to visit them.
    pub waypoints: &'a [Coordinate],
    /// Let the provider reorder waypoints.
    pub optimize: bool,
}

/// A mapping/places/directions provider.
///
/// Implementations report any provider status other than success as
/// [`MapsError::Status`].
#[async_trait]
pub trait MapsProvider: Send + Sync {
    /// Resolve a place name to the first matching location.
    async fn geocode(&self, address: &str) -> Result<Coordinate, MapsError>;

    /// Places near a point, in provider relevance order.
    async fn nearby_search(&self, query: NearbyQuery<'_>) -> Result<Vec<Place>, MapsError>;

    /// Route from origin to destination through the waypoints.
    async fn directions(&self, query: DirectionsQuery<'_>) -> Result<RouteResult, MapsError>;
}
