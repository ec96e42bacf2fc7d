use route_server::config::AppConfig;
use route_server::directions::DirectionsClient;
use route_server::geocoding::GeocodingClient;
use route_server::geolocation::{GeolocationClient, Locator};
use route_server::refresh::RefreshScheduler;
use route_server::stops::{StopRegistry, kigali_loop};
use route_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("route_server=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    // Load stops (built-in list unless a file is given)
    let registry = match &config.stops_file {
        Some(path) => StopRegistry::from_json_file(path).unwrap_or_else(|e| {
            error!(error = %e, path = %path.display(), "Failed to load stops");
            std::process::exit(1);
        }),
        None => kigali_loop(),
    };
    info!(stops = registry.len(), "Loaded stops");

    let geocoder = GeocodingClient::new(config.geocoding()).unwrap_or_else(|e| {
        error!(error = %e, "Failed to create geocoding client");
        std::process::exit(1);
    });

    let locator = match config.origin {
        Some(origin) => Locator::Fixed(origin),
        None => Locator::Remote(GeolocationClient::new(config.geolocation()).unwrap_or_else(
            |e| {
                error!(error = %e, "Failed to create geolocation client");
                std::process::exit(1);
            },
        )),
    };

    // Start refreshing in the background; the server comes up immediately
    let scheduler = RefreshScheduler::new(registry, geocoder, config.refresh());
    let directions_config = config.directions();
    scheduler.start(locator, move || DirectionsClient::new(directions_config));

    let state = AppState::new(scheduler.subscribe(), scheduler.interval());
    let app = create_router(state);

    let addr = config.bind_addr;
    info!("Route tracker listening on http://{addr}");
    info!("  GET  /               - Itinerary page");
    info!("  GET  /api/itinerary  - Itinerary snapshot (JSON)");
    info!("  GET  /health         - Health check");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    scheduler.shutdown();

    if let Err(e) = served {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
