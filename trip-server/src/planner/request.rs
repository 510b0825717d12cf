//! Validated trip requests.

use super::config::TripConfig;

/// Request validation failures. These are the caller's fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Start, destination or duration absent (or blank, or zero days)
    #[error("Missing required fields")]
    MissingFields,

    /// Duration present but not a whole number of days
    #[error("Invalid duration: expected a whole number of days")]
    InvalidDuration,

    /// Duration longer than the configured maximum
    #[error("Invalid duration: trips are limited to {max} days")]
    DurationTooLong { max: u32 },
}

/// A trip to plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub start_location: String,
    pub destination: String,
    /// At least 1.
    pub duration_days: u32,
    /// Accepted and logged but does not affect planning.
    pub budget: Option<String>,
    /// Attraction keyword, e.g. "beaches".
    pub preferences: Option<String>,
}

impl TripRequest {
    /// Create a request, rejecting blank places and a zero duration.
    pub fn new(
        start_location: &str,
        destination: &str,
        duration_days: u32,
    ) -> Result<Self, ValidationError> {
        let start_location = start_location.trim();
        let destination = destination.trim();

        if start_location.is_empty() || destination.is_empty() || duration_days == 0 {
            return Err(ValidationError::MissingFields);
        }

        Ok(Self {
            start_location: start_location.to_string(),
            destination: destination.to_string(),
            duration_days,
            budget: None,
            preferences: None,
        })
    }

    /// Set the attraction preference. Blank preferences are ignored.
    pub fn with_preferences(mut self, preferences: Option<&str>) -> Self {
        self.preferences = preferences
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_budget(mut self, budget: Option<String>) -> Self {
        self.budget = budget;
        self
    }

    /// Check limits that depend on configuration.
    pub fn validate(&self, config: &TripConfig) -> Result<(), ValidationError> {
        if self.duration_days > config.max_duration_days {
            return Err(ValidationError::DurationTooLong {
                max: config.max_duration_days,
            });
        }
        Ok(())
    }

    /// Keyword for the attraction search.
    pub fn attraction_keyword<'a>(&'a self, config: &'a TripConfig) -> &'a str {
        self.preferences
            .as_deref()
            .unwrap_or(config.attraction_keyword.as_str())
    }

    /// Number of attractions needed: two per day.
    pub fn attraction_slots(&self) -> usize {
        self.day_count() * 2
    }

    pub fn day_count(&self) -> usize {
        self.duration_days as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_request() {
        let req = TripRequest::new(" Mumbai ", "Goa", 3).unwrap();
        assert_eq!(req.start_location, "Mumbai");
        assert_eq!(req.destination, "Goa");
        assert_eq!(req.duration_days, 3);
        assert_eq!(req.attraction_slots(), 6);
        assert!(req.preferences.is_none());
    }

    #[test]
    fn blank_fields_are_missing() {
        assert_eq!(
            TripRequest::new("", "Goa", 3),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            TripRequest::new("Mumbai", "   ", 3),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            TripRequest::new("Mumbai", "Goa", 0),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn duration_limit() {
        let config = TripConfig::default();
        assert!(TripRequest::new("a", "b", 31).unwrap().validate(&config).is_ok());
        assert!(TripRequest::new("a", "b", 365).unwrap().validate(&config).is_ok());
        assert_eq!(
            TripRequest::new("a", "b", 366).unwrap().validate(&config),
            Err(ValidationError::DurationTooLong { max: 365 })
        );
        assert_eq!(
            TripRequest::new("a", "b", u32::MAX).unwrap().validate(&config),
            Err(ValidationError::DurationTooLong { max: 365 })
        );
    }

    #[test]
    fn preferences_choose_keyword() {
        let config = TripConfig::default();

        let req = TripRequest::new("a", "b", 1).unwrap();
        assert_eq!(req.attraction_keyword(&config), "tourist attractions");

        let req = req.with_preferences(Some(" beaches "));
        assert_eq!(req.attraction_keyword(&config), "beaches");

        let req = req.with_preferences(Some("  "));
        assert_eq!(req.attraction_keyword(&config), "tourist attractions");
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ValidationError::MissingFields.to_string(),
            "Missing required fields"
        );
        assert_eq!(
            ValidationError::InvalidDuration.to_string(),
            "Invalid duration: expected a whole number of days"
        );
        assert_eq!(
            ValidationError::DurationTooLong { max: 365 }.to_string(),
            "Invalid duration: trips are limited to 365 days"
        );
    }
}
