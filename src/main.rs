// Main entry point - Dependency injection and server setup
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use truckroute::infrastructure::config::load_app_config;
use truckroute::infrastructure::memory_repository::InMemoryRepository;
use truckroute::infrastructure::nominatim_geocoder::NominatimGeocoder;
use truckroute::infrastructure::osrm_router::OsrmRouter;
use truckroute::presentation::app_state::AppState;
use truckroute::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create collaborators (infrastructure layer)
    let geocoder = Arc::new(NominatimGeocoder::new(&config.geocoder)?);
    let routing = Arc::new(OsrmRouter::new(&config.routing)?);
    let repository = Arc::new(InMemoryRepository::new());

    // Create services (application layer)
    let state = Arc::new(AppState::new(geocoder, routing, repository));

    // Build router (presentation layer)
    let app = router(state);

    // Start server
    let addr = config.server.socket_addr()?;
    tracing::info!("Starting truckroute service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
