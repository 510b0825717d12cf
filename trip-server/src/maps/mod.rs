//! Maps provider integration.
//!
//! The trip planner talks to the outside world only through the
//! [`MapsProvider`] trait: geocoding, nearby place search and directions.
//! [`MapsClient`] implements it against the provider's HTTP web services;
//! [`MockMapsProvider`] serves canned data for tests and offline runs.
//!
//! Each provider response carries a `status` field, and anything other
//! than `OK` is reported as [`MapsError::Status`], including
//! `ZERO_RESULTS`.

mod client;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{DEFAULT_BASE_URL, MapsClient, MapsConfig};
pub use error::{MapsError, Operation, STATUS_OK};
pub use mock::{MockCall, MockFixture, MockMapsProvider, MockRoute};
pub use provider::{DirectionsQuery, MapsProvider, NearbyQuery};
pub use types::{
    DirectionsResponse, GeocodeResponse, GeocodeResult, Geometry, OverviewPolyline,
    PlaceResult, PlacesResponse, Route,
};
