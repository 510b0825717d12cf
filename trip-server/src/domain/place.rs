//! Points of interest returned by a nearby search.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A place found near the destination.
///
/// Only `name` and `coordinate` drive planning. The remaining fields are
/// whatever category metadata the provider returned and are carried along
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,

    pub coordinate: Coordinate,

    /// Provider's stable identifier for the place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,

    /// Short address or neighbourhood description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,

    /// Provider category tags, e.g. `museum`, `lodging`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

impl Place {
    /// Create a place with no metadata.
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
            place_id: None,
            vicinity: None,
            rating: None,
            user_ratings_total: None,
            types: Vec::new(),
        }
    }

    /// The name, if it has any visible content.
    ///
    /// Nameless places are treated the same as missing ones when filling
    /// itinerary slots.
    pub fn display_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }
}
