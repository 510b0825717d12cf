use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trip_server::config::{API_KEY_VAR, ServerConfig};
use trip_server::maps::{MapsClient, MockMapsProvider};
use trip_server::planner::TripConfig;
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");
    let trip_config = TripConfig::default();

    // Build app state with the live provider, or canned data if asked
    let state = match &config.mock_fixture {
        Some(path) => {
            info!(fixture = %path.display(), "using mock maps provider");
            let mock = MockMapsProvider::from_json_file(path).expect("Failed to load mock fixture");
            AppState::new(mock, trip_config)
        }
        None => {
            if config.api_key.is_none() {
                warn!("{API_KEY_VAR} not set. Provider calls will fail.");
            }
            let client =
                MapsClient::new(config.maps_config()).expect("Failed to create maps client");
            AppState::new(client, trip_config)
        }
    };

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = config.addr;
    info!("Trip planner listening on http://{addr}");
    info!("  POST /api/trip          - Plan a trip");
    info!("  POST /api/route/decode  - Decode a route path");
    info!("  GET  /health            - Health check");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
