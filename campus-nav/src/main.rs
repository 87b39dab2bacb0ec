use campus_nav::config::AppConfig;
use campus_nav::geofence::BuildingFeed;
use campus_nav::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "campus_nav=info,tower_http=info";

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Load building outlines (fail fast if a path was given but is unusable)
    let buildings = match &config.buildings_path {
        Some(path) => match BuildingFeed::from_path(path) {
            Ok(feed) => feed,
            Err(e) => {
                error!("failed to load buildings: {e}");
                std::process::exit(1);
            }
        },
        None => {
            info!("no building file configured, starting with an empty set");
            BuildingFeed::default()
        }
    };

    let state = AppState::new(buildings, config.routes.clone());
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {e}", config.addr);
            std::process::exit(1);
        }
    };

    info!("campus navigation listening on http://{}", config.addr);
    info!("  GET  /health                  - Health check");
    info!("  POST /api/routes/rank         - Rank directions-provider routes");
    info!("  POST /api/geofence/classify   - Classify a location tick");
    info!("  GET  /api/buildings           - List building outlines");
    info!("  PUT  /api/buildings           - Replace building outlines");
    info!("  GET  /api/buildings/:id       - Building details");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
