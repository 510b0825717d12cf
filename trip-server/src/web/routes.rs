//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::planner::{TripError, TripPlanner, ValidationError};
use crate::polyline;

use super::dto::*;
use super::state::AppState;

/// Body returned for any planning failure. Details are only logged.
pub const TRIP_FAILED_MESSAGE: &str = "Failed to generate trip";

const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // The UI is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/trip", post(plan_trip))
        .route("/api/route/decode", post(decode_route))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan a trip.
async fn plan_trip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TripPlanResponse>, AppError> {
    // An empty body is a request with every field missing
    let body: TripRequestBody = if body.is_empty() {
        TripRequestBody::default()
    } else {
        parse_json(&body)?
    };
    let request = body.into_request()?;

    let planner = TripPlanner::new(state.maps.as_ref(), &state.config);
    let plan = planner.plan(&request).await?;

    Ok(Json(TripPlanResponse::from_plan(plan)))
}

/// Decode an encoded route path into points.
async fn decode_route(body: Bytes) -> Result<Json<DecodeRouteResponse>, AppError> {
    let req: DecodeRouteRequest = parse_json(&body)?;
    let points = polyline::decode(&req.path).map_err(|e| AppError::BadRequest {
        message: format!("Invalid route path: {e}"),
    })?;
    Ok(Json(DecodeRouteResponse { points }))
}

/// Parse JSON manually so the body can be logged on failure.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, body = %String::from_utf8_lossy(body), "JSON parse error");
        AppError::BadRequest {
            message: INVALID_BODY_MESSAGE.to_string(),
        }
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The caller sent something unusable; the message is shown to them.
    BadRequest { message: String },

    /// Planning failed; the caller only sees a generic message.
    TripFailed(TripError),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<TripError> for AppError {
    fn from(e: TripError) -> Self {
        match e {
            TripError::Validation(v) => v.into(),
            other => AppError::TripFailed(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "rejected request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::TripFailed(e) => {
                error!(
                    stage = e.stage(),
                    provider_status = e.provider_status(),
                    timeout = e.is_timeout(),
                    error = %e,
                    "Error generating trip"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    TRIP_FAILED_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
