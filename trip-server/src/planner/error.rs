//! Trip planning errors.

use crate::maps::MapsError;

use super::request::ValidationError;

/// Why a trip could not be planned.
///
/// Every variant except `Validation` comes from a single failed provider
/// call; the pipeline stops at the first one.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("geocoding {place:?} failed: {source}")]
    Geocoding { place: String, source: MapsError },

    #[error("place search for {keyword:?} failed: {source}")]
    PlaceSearch { keyword: String, source: MapsError },

    #[error("directions failed: {source}")]
    Directions { source: MapsError },
}

impl TripError {
    fn maps_error(&self) -> Option<&MapsError> {
        match self {
            TripError::Validation(_) => None,
            TripError::Geocoding { source, .. }
            | TripError::PlaceSearch { source, .. }
            | TripError::Directions { source } => Some(source),
        }
    }

    /// Provider status behind the failure, if the provider answered.
    pub fn provider_status(&self) -> Option<&str> {
        self.maps_error().and_then(MapsError::provider_status)
    }

    /// Whether the failure was a timeout rather than a provider answer.
    pub fn is_timeout(&self) -> bool {
        self.maps_error().is_some_and(MapsError::is_timeout)
    }

    /// Short name of the failing stage, for logs.
    pub fn stage(&self) -> &'static str {
        match self {
            TripError::Validation(_) => "validation",
            TripError::Geocoding { .. } => "geocode",
            TripError::PlaceSearch { .. } => "place search",
            TripError::Directions { .. } => "directions",
        }
    }
}
