//! Data transfer objects for web requests and responses.
//!
//! Field names follow what the trip planning UI sends and reads
//! (`startLocation`, `startCoords`, `days[].food`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Coordinate, DayPlan, Place, TripPlan};
use crate::planner::{TripRequest, ValidationError};

/// Body of `POST /api/trip`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequestBody {
    /// Where the trip starts (free text)
    pub start_location: Option<String>,

    /// Where the trip goes (free text)
    pub destination: Option<String>,

    /// Number of days, as a whole number or a numeric string
    pub duration: Option<Value>,

    /// Free-form budget; accepted but not used for planning
    pub budget: Option<Value>,

    /// Attraction keyword, e.g. "beaches"
    pub preferences: Option<String>,
}

impl TripRequestBody {
    /// Validate into a trip request.
    ///
    /// Missing places are reported before a malformed duration.
    pub fn into_request(self) -> Result<TripRequest, ValidationError> {
        let start_location = self.start_location.unwrap_or_default();
        let destination = self.destination.unwrap_or_default();
        if start_location.trim().is_empty() || destination.trim().is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let duration = parse_duration(self.duration.as_ref())?;

        Ok(TripRequest::new(&start_location, &destination, duration)?
            .with_preferences(self.preferences.as_deref())
            .with_budget(self.budget.as_ref().and_then(budget_text)))
    }
}

/// Day count from a JSON number or numeric string.
///
/// Absent, null and blank values come back as 0, which request
/// construction reports as a missing field.
fn parse_duration(value: Option<&Value>) -> Result<u32, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => {
            if let Some(days) = n.as_u64() {
                return Ok(u32::try_from(days).unwrap_or(u32::MAX));
            }
            n.as_f64().map_or(Err(ValidationError::InvalidDuration), whole_days)
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(0);
            }
            if let Ok(days) = s.parse::<u32>() {
                return Ok(days);
            }
            s.parse::<f64>()
                .map_err(|_| ValidationError::InvalidDuration)
                .and_then(whole_days)
        }
        Some(_) => Err(ValidationError::InvalidDuration),
    }
}

/// Accept a non-negative whole number, saturating at `u32::MAX`.
fn whole_days(days: f64) -> Result<u32, ValidationError> {
    if days.is_finite() && days >= 0.0 && days.fract() == 0.0 {
        Ok(days.min(f64::from(u32::MAX)) as u32)
    } else {
        Err(ValidationError::InvalidDuration)
    }
}

fn budget_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Successful response of `POST /api/trip`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlanResponse {
    pub start_location: String,
    pub destination: String,

    /// One entry per day
    pub days: Vec<DayPlanResult>,

    /// Lodging suggestion
    pub stay: String,

    /// Encoded polyline of the route
    pub route: String,

    /// Provider's optimized visiting order of `attractions`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoint_order: Option<Vec<usize>>,

    pub start_coords: Coordinate,
    pub destination_coords: Coordinate,

    /// Attraction markers, in route waypoint order
    pub attractions: Vec<AttractionResult>,
}

/// One day of the plan.
#[derive(Debug, Serialize)]
pub struct DayPlanResult {
    /// 1-based day number
    pub day: u32,

    /// Exactly two activity lines
    pub activities: [String; 2],

    /// Meal suggestion
    pub food: String,
}

/// An attraction marker for the map.
#[derive(Debug, Serialize)]
pub struct AttractionResult {
    pub name: String,
    pub geometry: GeometryResult,
}

#[derive(Debug, Serialize)]
pub struct GeometryResult {
    pub location: Coordinate,
}

/// Body of `POST /api/route/decode`.
#[derive(Debug, Deserialize)]
pub struct DecodeRouteRequest {
    /// Encoded polyline
    pub path: String,
}

/// Decoded route points.
#[derive(Debug, Serialize)]
pub struct DecodeRouteResponse {
    pub points: Vec<Coordinate>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl TripPlanResponse {
    /// Create from a planned trip.
    pub fn from_plan(plan: TripPlan) -> Self {
        Self {
            start_location: plan.start_location,
            destination: plan.destination,
            days: plan.days.into_iter().map(DayPlanResult::from_day).collect(),
            stay: plan.stay,
            route: plan.route,
            waypoint_order: plan.waypoint_order,
            start_coords: plan.start_coordinate,
            destination_coords: plan.destination_coordinate,
            attractions: plan
                .attractions
                .into_iter()
                .map(AttractionResult::from_place)
                .collect(),
        }
    }
}

impl DayPlanResult {
    /// Create from a domain day plan.
    pub fn from_day(day: DayPlan) -> Self {
        Self {
            day: day.day_number,
            activities: day.activities,
            food: day.meal,
        }
    }
}

impl AttractionResult {
    /// Create from a place; only name and location are exposed.
    pub fn from_place(place: Place) -> Self {
        Self {
            name: place.name,
            geometry: GeometryResult {
                location: place.coordinate,
            },
        }
    }
}
