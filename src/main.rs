// Main entry point - Dependency injection and server setup
use std::sync::Arc;
use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use rail_reporting::application::report_service::ReportService;
use rail_reporting::application::telemetry_repository::TelemetryRepository;
use rail_reporting::infrastructure::config::load_app_config;
use rail_reporting::infrastructure::memory_repository::InMemoryRepository;
use rail_reporting::presentation::app_state::AppState;
use rail_reporting::presentation::handlers::{delay_trends, health_check, hotspots, kpis, root, throughput};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository: Arc<dyn TelemetryRepository> = match &config.store.seed_path {
        Some(path) => {
            tracing::info!("Loading telemetry seed from {}", path.display());
            Arc::new(InMemoryRepository::load_seed_file(path)?)
        }
        None => {
            tracing::warn!("No seed file configured, starting with an empty telemetry store");
            Arc::new(InMemoryRepository::new())
        }
    };

    // Create services (application layer)
    let report_service = ReportService::new(repository, config.kpi);

    let state = Arc::new(AppState {
        app_name: config.app_name.clone(),
        report_service,
    });

    // Build router (presentation layer)
    let reports = Router::new()
        .route("/kpis", get(kpis))
        .route("/delay_trends", get(delay_trends))
        .route("/throughput", get(throughput))
        .route("/hotspots", get(hotspots));

    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest(&config.server.api_prefix, reports)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server.socket_addr()?;
    tracing::info!("Starting {} reporting service on {}", config.app_name, addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
