//! HTTP client for the maps provider's web services.
//!
//! Every request carries the API key as a `key` query parameter. Error
//! values never include the request URL, so the key stays out of logs.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Coordinate, Place, RouteResult};

use super::error::{MapsError, Operation};
use super::provider::{DirectionsQuery, MapsProvider, NearbyQuery};
use super::types::{DirectionsResponse, GeocodeResponse, PlacesResponse};

/// Default base URL for the provider's web services.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How much of an unparseable body to keep for diagnostics.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the maps client.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key for the provider
    pub api_key: String,
    /// Base URL for the API (defaults to the production endpoint)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing or a proxy).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Maps provider client.
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MapsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        if config.timeout_secs == 0 {
            return Err(MapsError::InvalidConfig(
                "timeout must be at least one second".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MapsError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// GET `{base_url}/{path}` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MapsError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| transport_error(operation, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::Api {
                status: status.as_u16(),
                message: body.chars().take(BODY_SNIPPET_CHARS).collect(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(operation, e))?;

        serde_json::from_str(&body).map_err(|e| MapsError::Json {
            message: format!(
                "{e} (body: {})",
                body.chars().take(BODY_SNIPPET_CHARS).collect::<String>()
            ),
        })
    }
}

#[async_trait]
impl MapsProvider for MapsClient {
    async fn geocode(&self, address: &str) -> Result<Coordinate, MapsError> {
        debug!(address, "geocode request");
        let response: GeocodeResponse = self
            .get_json(
                Operation::Geocode,
                "geocode/json",
                &[("address", address.to_string())],
            )
            .await?;
        response.into_coordinate()
    }

    async fn nearby_search(&self, query: NearbyQuery<'_>) -> Result<Vec<Place>, MapsError> {
        debug!(
            keyword = query.keyword,
            center = %query.center,
            radius = query.radius_meters,
            "nearby search request"
        );
        let response: PlacesResponse = self
            .get_json(
                Operation::NearbySearch,
                "place/nearbysearch/json",
                &nearby_params(&query),
            )
            .await?;
        response.into_places()
    }

    async fn directions(&self, query: DirectionsQuery<'_>) -> Result<RouteResult, MapsError> {
        debug!(
            origin = query.origin,
            destination = query.destination,
            waypoints = query.waypoints.len(),
            optimize = query.optimize,
            "directions request"
        );
        let response: DirectionsResponse = self
            .get_json(
                Operation::Directions,
                "directions/json",
                &directions_params(&query),
            )
            .await?;
        response.into_route()
    }
}

/// Strip the URL (which holds the key) and classify timeouts.
fn transport_error(operation: Operation, err: reqwest::Error) -> MapsError {
    if err.is_timeout() {
        MapsError::Timeout { operation }
    } else {
        MapsError::Http(err.without_url())
    }
}

fn nearby_params(query: &NearbyQuery<'_>) -> Vec<(&'static str, String)> {
    vec![
        ("location", query.center.to_string()),
        ("radius", query.radius_meters.to_string()),
        ("keyword", query.keyword.to_string()),
    ]
}

fn directions_params(query: &DirectionsQuery<'_>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("origin", query.origin.to_string()),
        ("destination", query.destination.to_string()),
    ];
    if let Some(waypoints) = waypoints_param(query.waypoints, query.optimize) {
        params.push(("waypoints", waypoints));
    }
    params
}

/// Pipe-delimited `lat,lng` list, prefixed with `optimize:true` when the
/// provider may reorder. `None` when there are no waypoints.
fn waypoints_param(waypoints: &[Coordinate], optimize: bool) -> Option<String> {
    if waypoints.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::with_capacity(waypoints.len() + 1);
    if optimize {
        parts.push("optimize:true".to_string());
    }
    parts.extend(waypoints.iter().map(Coordinate::to_string));
    Some(parts.join("|"))
}
