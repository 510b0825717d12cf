//! The trip-assembly pipeline.
//!
//! Stages run in dependency order:
//!
//! 1. geocode the start, then the destination
//! 2. search attractions, restaurants and lodging around the destination
//!    (these three are independent and run concurrently)
//! 3. order the attractions and route through them
//! 4. assemble the day-by-day plan
//!
//! The first failing stage aborts the whole plan; there are no retries and
//! no partial results.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::{Coordinate, Place, RouteResult, TripPlan};
use crate::maps::{DirectionsQuery, MapsError, MapsProvider, NearbyQuery, Operation};

use super::assemble::assemble;
use super::config::TripConfig;
use super::error::TripError;
use super::rank::{sort_by_latitude, take_prefix};
use super::request::{TripRequest, ValidationError};

/// Trip planner over a maps provider.
pub struct TripPlanner<'a, P: MapsProvider + ?Sized> {
    provider: &'a P,
    config: &'a TripConfig,
}

impl<'a, P: MapsProvider + ?Sized> TripPlanner<'a, P> {
    /// Create a new planner.
    pub fn new(provider: &'a P, config: &'a TripConfig) -> Self {
        Self { provider, config }
    }

    /// Plan a trip.
    pub async fn plan(&self, request: &TripRequest) -> Result<TripPlan, TripError> {
        request.validate(self.config)?;

        info!(
            start = %request.start_location,
            destination = %request.destination,
            days = request.duration_days,
            preferences = request.preferences.as_deref(),
            budget = request.budget.as_deref(),
            "planning trip"
        );

        let start = self.resolve(&request.start_location).await?;
        let destination = self.resolve(&request.destination).await?;

        let attraction_keyword = request.attraction_keyword(self.config);
        let (attractions, restaurants, lodging) = tokio::try_join!(
            self.search(
                destination,
                attraction_keyword,
                request.attraction_slots()
            ),
            self.search(
                destination,
                &self.config.restaurant_keyword,
                request.day_count()
            ),
            self.search(destination, &self.config.lodging_keyword, 1),
        )?;

        // Truncated by `search`; only the kept attractions are sorted
        let attractions = sort_by_latitude(attractions);
        let waypoints: Vec<Coordinate> = attractions.iter().map(|p| p.coordinate).collect();

        let route = self
            .route(
                &request.start_location,
                &request.destination,
                &waypoints,
                true,
            )
            .await?;

        // The provider may visit waypoints in a different order from
        // `attractions`; day assignment keeps the latitude order.
        if let Some(order) = &route.waypoint_order {
            debug!(?order, "provider waypoint order");
        }

        let plan = assemble(
            request,
            start,
            destination,
            attractions,
            &restaurants,
            lodging.first(),
            route,
        );

        info!(
            days = plan.days.len(),
            attractions = plan.attractions.len(),
            "trip planned"
        );
        Ok(plan)
    }

    /// Resolve a place name to a coordinate (first match).
    pub async fn resolve(&self, place_name: &str) -> Result<Coordinate, TripError> {
        let place_name = place_name.trim();
        if place_name.is_empty() {
            return Err(ValidationError::MissingFields.into());
        }

        let coordinate = with_deadline(
            Operation::Geocode,
            self.config.lookup_timeout(),
            self.provider.geocode(place_name),
        )
        .await
        .map_err(|source| TripError::Geocoding {
            place: place_name.to_string(),
            source,
        })?;

        debug!(place = place_name, %coordinate, "geocoded");
        Ok(coordinate)
    }

    /// Find up to `limit` places matching `keyword` around `center`.
    ///
    /// Results keep the provider's relevance order; anything past `limit`
    /// is dropped.
    pub async fn search(
        &self,
        center: Coordinate,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<Place>, TripError> {
        let query = NearbyQuery {
            center,
            radius_meters: self.config.search_radius_m,
            keyword,
        };

        let places = with_deadline(
            Operation::NearbySearch,
            self.config.lookup_timeout(),
            self.provider.nearby_search(query),
        )
        .await
        .map_err(|source| TripError::PlaceSearch {
            keyword: keyword.to_string(),
            source,
        })?;

        debug!(keyword, found = places.len(), limit, "place search");
        Ok(take_prefix(places, limit))
    }

    /// Route from `origin` to `destination` through `waypoints`.
    ///
    /// With `optimize`, the provider chooses the visiting order.
    pub async fn route(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[Coordinate],
        optimize: bool,
    ) -> Result<RouteResult, TripError> {
        let query = DirectionsQuery {
            origin,
            destination,
            waypoints,
            optimize,
        };

        with_deadline(
            Operation::Directions,
            self.config.directions_timeout(),
            self.provider.directions(query),
        )
        .await
        .map_err(|source| TripError::Directions { source })
    }
}

/// Run a provider call, failing with `Timeout` if it takes longer than
/// `limit`.
async fn with_deadline<T>(
    operation: Operation,
    limit: Duration,
    call: impl Future<Output = Result<T, MapsError>>,
) -> Result<T, MapsError> {
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| MapsError::Timeout { operation })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::{MockCall, MockMapsProvider};
    use crate::planner::assemble::{
        FALLBACK_FIRST_ACTIVITY, FALLBACK_MEAL, FALLBACK_SECOND_ACTIVITY, FALLBACK_STAY,
    };
    use crate::polyline;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn place(name: &str, lat: f64, lng: f64) -> Place {
        Place::new(name, coord(lat, lng))
    }

    fn mumbai() -> Coordinate {
        coord(19.076, 72.8777)
    }

    fn goa() -> Coordinate {
        coord(15.2993, 74.124)
    }

    /// A provider with everything needed for a trip from Mumbai to Goa.
    fn goa_provider() -> MockMapsProvider {
        MockMapsProvider::new()
            .with_location("Mumbai", mumbai())
            .with_location("Goa", goa())
            .with_places(
                "tourist attractions",
                vec![
                    place("Baga Beach", 15.5553, 73.7517),
                    place("Dudhsagar Falls", 15.3144, 74.3143),
                    place("Basilica of Bom Jesus", 15.5009, 73.9116),
                    place("Fort Aguada", 15.4920, 73.7737),
                    place("Palolem Beach", 15.0100, 74.0232),
                ],
            )
            .with_places(
                "restaurants",
                vec![
                    place("Gunpowder", 15.5400, 73.7800),
                    place("Fisherman's Wharf", 15.2300, 73.9300),
                    place("Thalassa", 15.6000, 73.7400),
                ],
            )
            .with_places(
                "hotels",
                vec![
                    place("Taj Exotica", 15.2120, 73.9420),
                    place("Park Hyatt", 15.3500, 73.9000),
                ],
            )
    }

    fn request(days: u32) -> TripRequest {
        TripRequest::new("Mumbai", "Goa", days).unwrap()
    }

    async fn plan_with(provider: &MockMapsProvider, req: &TripRequest) -> Result<TripPlan, TripError> {
        let config = TripConfig::default();
        TripPlanner::new(provider, &config).plan(req).await
    }

    fn attraction_names(plan: &TripPlan) -> Vec<&str> {
        plan.attractions.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn plans_full_trip() {
        let provider = goa_provider();
        let plan = plan_with(&provider, &request(2)).await.unwrap();

        assert_eq!(plan.start_location, "Mumbai");
        assert_eq!(plan.destination, "Goa");
        assert_eq!(plan.start_coordinate, mumbai());
        assert_eq!(plan.destination_coordinate, goa());

        // First four results, sorted south to north
        assert_eq!(
            attraction_names(&plan),
            vec![
                "Dudhsagar Falls",
                "Fort Aguada",
                "Basilica of Bom Jesus",
                "Baga Beach"
            ]
        );

        assert_eq!(plan.days.len(), 2);
        assert_eq!(
            plan.days[0].activities,
            [
                "Visit Dudhsagar Falls".to_string(),
                "Visit Fort Aguada".to_string()
            ]
        );
        assert_eq!(plan.days[0].meal, "Dine at Gunpowder");
        assert_eq!(
            plan.days[1].activities,
            [
                "Visit Basilica of Bom Jesus".to_string(),
                "Visit Baga Beach".to_string()
            ]
        );
        assert_eq!(plan.days[1].meal, "Dine at Fisherman's Wharf");
        assert_eq!(plan.stay, "Stay at Taj Exotica");
    }

    #[tokio::test]
    async fn route_waypoints_follow_attraction_order() {
        let provider = goa_provider();
        let plan = plan_with(&provider, &request(2)).await.unwrap();

        let directions = provider
            .calls()
            .into_iter()
            .find_map(|call| match call {
                MockCall::Directions {
                    origin,
                    destination,
                    waypoints,
                    optimize,
                } => Some((origin, destination, waypoints, optimize)),
                _ => None,
            })
            .unwrap();

        assert_eq!(directions.0, "Mumbai");
        assert_eq!(directions.1, "Goa");
        assert!(directions.3);
        let expected: Vec<Coordinate> = plan.attractions.iter().map(|p| p.coordinate).collect();
        assert_eq!(directions.2, expected);

        // Mock route is a straight line: start, waypoints, destination
        let path = polyline::decode(&plan.route).unwrap();
        assert_eq!(path.len(), 6);
    }

    #[tokio::test]
    async fn call_sequence_and_parameters() {
        let provider = goa_provider().with_places("beaches", vec![place("Baga Beach", 15.55, 73.75)]);
        plan_with(&provider, &request(3).with_preferences(Some("beaches")))
            .await
            .unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 6);
        assert_eq!(calls[0], MockCall::Geocode("Mumbai".to_string()));
        assert_eq!(calls[1], MockCall::Geocode("Goa".to_string()));
        for keyword in ["beaches", "restaurants", "hotels"] {
            assert!(calls[2..5].contains(&MockCall::NearbySearch {
                keyword: keyword.to_string(),
                radius_meters: 50_000,
            }));
        }
        assert!(matches!(calls[5], MockCall::Directions { .. }));
    }

    #[tokio::test]
    async fn uses_preferences_as_keyword() {
        let provider = goa_provider().with_places(
            "beaches",
            vec![place("Palolem Beach", 15.01, 74.02), place("Baga Beach", 15.55, 73.75)],
        );
        let req = request(1).with_preferences(Some("beaches"));
        let plan = plan_with(&provider, &req).await.unwrap();

        assert_eq!(
            plan.days[0].activities,
            [
                "Visit Palolem Beach".to_string(),
                "Visit Baga Beach".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn truncates_to_two_per_day_then_sorts() {
        let provider = goa_provider().with_places(
            "tourist attractions",
            vec![
                place("ten", 10.0, 74.0),
                place("minus five", -5.0, 74.0),
                place("twenty", 20.0, 74.0),
            ],
        );

        let plan = plan_with(&provider, &request(2)).await.unwrap();
        assert_eq!(attraction_names(&plan), vec!["minus five", "ten", "twenty"]);

        let plan = plan_with(&provider, &request(1)).await.unwrap();
        assert_eq!(attraction_names(&plan), vec!["minus five", "ten"]);
    }

    #[tokio::test]
    async fn restaurants_limited_to_one_per_day() {
        let provider = goa_provider();
        let plan = plan_with(&provider, &request(5)).await.unwrap();

        let meals: Vec<&str> = plan.days.iter().map(|d| d.meal.as_str()).collect();
        assert_eq!(
            meals,
            vec![
                "Dine at Gunpowder",
                "Dine at Fisherman's Wharf",
                "Dine at Thalassa",
                FALLBACK_MEAL,
                FALLBACK_MEAL,
            ]
        );
        // Five attractions for ten slots
        assert_eq!(plan.days[2].activities[1], FALLBACK_SECOND_ACTIVITY);
        assert_eq!(plan.days[3].activities[0], FALLBACK_FIRST_ACTIVITY);
    }

    #[tokio::test]
    async fn no_hotels_found() {
        let provider = goa_provider().with_places("hotels", Vec::new());
        let plan = plan_with(&provider, &request(1)).await.unwrap();
        assert_eq!(plan.stay, FALLBACK_STAY);
    }

    #[tokio::test]
    async fn day_count_always_matches() {
        let provider = goa_provider();
        for days in [1, 2, 7, 15, 30, 45] {
            let plan = plan_with(&provider, &request(days)).await.unwrap();
            assert_eq!(plan.days.len(), days as usize);
        }
    }

    #[tokio::test]
    async fn provider_waypoint_order_is_not_applied() {
        // The provider wants to visit the northernmost attraction first;
        // the itinerary text stays in latitude order.
        let provider = goa_provider().with_route(
            RouteResult::new("_p~iF~ps|U_ulLnnqC_mqNvxq`@").with_waypoint_order(vec![3, 2, 1, 0]),
        );
        let plan = plan_with(&provider, &request(2)).await.unwrap();

        assert_eq!(plan.route, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        assert_eq!(plan.waypoint_order, Some(vec![3, 2, 1, 0]));
        assert_eq!(plan.attractions[0].name, "Dudhsagar Falls");
        assert_eq!(plan.days[0].activities[0], "Visit Dudhsagar Falls");
    }

    #[tokio::test]
    async fn start_geocode_failure() {
        let provider = goa_provider().fail_geocode("Mumbai", "REQUEST_DENIED");
        let err = plan_with(&provider, &request(2)).await.unwrap_err();

        match &err {
            TripError::Geocoding { place, .. } => assert_eq!(place, "Mumbai"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.provider_status(), Some("REQUEST_DENIED"));
        // Nothing after the failed stage ran
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn destination_geocode_failure() {
        let provider = goa_provider().fail_geocode("Goa", "ZERO_RESULTS");
        let err = plan_with(&provider, &request(2)).await.unwrap_err();

        assert!(matches!(&err, TripError::Geocoding { place, .. } if place == "Goa"));
        assert!(
            provider
                .calls()
                .iter()
                .all(|c| matches!(c, MockCall::Geocode(_)))
        );
    }

    #[tokio::test]
    async fn each_search_failure_aborts() {
        for keyword in ["tourist attractions", "restaurants", "hotels"] {
            let provider = goa_provider().fail_search(keyword, "OVER_QUERY_LIMIT");
            let err = plan_with(&provider, &request(2)).await.unwrap_err();

            match &err {
                TripError::PlaceSearch { keyword: k, .. } => assert_eq!(k, keyword),
                other => panic!("unexpected error for {keyword}: {other:?}"),
            }
            assert_eq!(err.provider_status(), Some("OVER_QUERY_LIMIT"));
            assert!(
                !provider
                    .calls()
                    .iter()
                    .any(|c| matches!(c, MockCall::Directions { .. })),
                "directions should not run after {keyword} failed"
            );
        }
    }

    #[tokio::test]
    async fn zero_results_search_is_failure() {
        // Searching for a keyword the provider knows nothing about
        let provider = goa_provider();
        let req = request(1).with_preferences(Some("volcanoes"));
        let err = plan_with(&provider, &req).await.unwrap_err();
        assert_eq!(err.provider_status(), Some("ZERO_RESULTS"));
    }

    #[tokio::test]
    async fn directions_failure() {
        let provider = goa_provider().fail_directions("MAX_WAYPOINTS_EXCEEDED");
        let err = plan_with(&provider, &request(2)).await.unwrap_err();

        assert!(matches!(err, TripError::Directions { .. }));
        assert_eq!(err.provider_status(), Some("MAX_WAYPOINTS_EXCEEDED"));
        assert!(!err.is_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn directions_timeout() {
        let provider = goa_provider().with_directions_delay(Duration::from_secs(60));
        let err = plan_with(&provider, &request(2)).await.unwrap_err();

        assert!(matches!(err, TripError::Directions { .. }));
        assert!(err.is_timeout());
        assert_eq!(err.provider_status(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn start_geocode_timeout() {
        let provider = goa_provider().with_geocode_delay("Mumbai", Duration::from_secs(60));
        let err = plan_with(&provider, &request(2)).await.unwrap_err();

        assert!(matches!(&err, TripError::Geocoding { place, .. } if place == "Mumbai"));
        assert!(err.is_timeout());
        assert_eq!(err.provider_status(), None);
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn destination_geocode_timeout() {
        let provider = goa_provider().with_geocode_delay("Goa", Duration::from_secs(11));
        let err = plan_with(&provider, &request(2)).await.unwrap_err();

        assert!(matches!(&err, TripError::Geocoding { place, .. } if place == "Goa"));
        assert!(err.is_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn place_search_timeout() {
        for keyword in ["tourist attractions", "restaurants", "hotels"] {
            let provider = goa_provider().with_search_delay(keyword, Duration::from_secs(60));
            let err = plan_with(&provider, &request(2)).await.unwrap_err();

            match &err {
                TripError::PlaceSearch { keyword: k, .. } => assert_eq!(k, keyword),
                other => panic!("unexpected error for {keyword}: {other:?}"),
            }
            assert!(err.is_timeout(), "{keyword} should time out");
            assert!(
                !provider
                    .calls()
                    .iter()
                    .any(|c| matches!(c, MockCall::Directions { .. }))
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_lookups_within_deadline() {
        let provider = goa_provider()
            .with_geocode_delay("Goa", Duration::from_secs(9))
            .with_search_delay("restaurants", Duration::from_secs(9));
        assert!(plan_with(&provider, &request(1)).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_directions_within_deadline() {
        let provider = goa_provider().with_directions_delay(Duration::from_secs(9));
        assert!(plan_with(&provider, &request(1)).await.is_ok());
    }

    #[tokio::test]
    async fn month_long_trip_is_planned() {
        let provider = goa_provider();
        let plan = plan_with(&provider, &request(31)).await.unwrap();

        assert_eq!(plan.days.len(), 31);
        assert_eq!(plan.days[30].day_number, 31);
        assert_eq!(provider.calls().len(), 6);
    }

    #[tokio::test]
    async fn over_long_trip_rejected_before_any_call() {
        let provider = goa_provider();
        let err = plan_with(&provider, &request(366)).await.unwrap_err();

        assert!(matches!(
            err,
            TripError::Validation(ValidationError::DurationTooLong { max: 365 })
        ));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn blank_place_name_is_validation_error() {
        let provider = goa_provider();
        let config = TripConfig::default();
        let planner = TripPlanner::new(&provider, &config);

        let err = planner.resolve("  ").await.unwrap_err();
        assert!(matches!(
            err,
            TripError::Validation(ValidationError::MissingFields)
        ));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn works_through_trait_object() {
        let provider: Box<dyn MapsProvider> = Box::new(goa_provider());
        let config = TripConfig::default();
        let plan = TripPlanner::new(provider.as_ref(), &config)
            .plan(&request(1))
            .await
            .unwrap();
        assert_eq!(plan.days.len(), 1);
    }
}
