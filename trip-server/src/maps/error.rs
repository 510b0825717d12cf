//! Maps provider error types.

use std::fmt;

/// Status value the provider uses for success.
pub const STATUS_OK: &str = "OK";

/// Which provider call an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Geocode,
    NearbySearch,
    Directions,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Geocode => "geocode",
            Operation::NearbySearch => "nearby search",
            Operation::Directions => "directions",
        })
    }
}

/// Errors from a maps provider call.
#[derive(Debug, thiserror::Error)]
pub enum MapsError {
    /// Transport failure (connection refused, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No response within the allowed time
    #[error("{operation} request timed out")]
    Timeout { operation: Operation },

    /// Non-2xx HTTP status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Provider answered, but with a status other than `OK`
    #[error("provider status {status}{}", .message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default())]
    Status {
        status: String,
        message: Option<String>,
    },

    /// Status was `OK` but the result we need was missing
    #[error("{operation} response contained no results")]
    EmptyResult { operation: Operation },

    /// Client could not be built from its configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MapsError {
    /// Build a `Status` error for a non-success provider status.
    pub fn status(status: impl Into<String>) -> Self {
        MapsError::Status {
            status: status.into(),
            message: None,
        }
    }

    /// Provider status string, when the provider answered with one.
    pub fn provider_status(&self) -> Option<&str> {
        match self {
            MapsError::Status { status, .. } => Some(status),
            _ => None,
        }
    }

    /// Whether this is a timeout, from either our own deadline or the
    /// HTTP client's.
    pub fn is_timeout(&self) -> bool {
        match self {
            MapsError::Timeout { .. } => true,
            MapsError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Fail unless the provider reported `OK`.
pub(crate) fn check_status(status: &str, message: Option<&str>) -> Result<(), MapsError> {
    if status == STATUS_OK {
        return Ok(());
    }
    Err(MapsError::Status {
        status: status.to_string(),
        message: message.map(str::to_string),
    })
}
