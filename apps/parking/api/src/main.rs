use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_parking::InMemoryLotRepository;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Colored error output before any fallible operation
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let catalog = match &config.catalog_path {
        Some(path) => InMemoryLotRepository::from_path(path).await?,
        None => {
            info!("PARKING_CATALOG_PATH not set, using bundled seed catalog");
            InMemoryLotRepository::seed()?
        }
    };
    info!(lots = catalog.len(), "Lot catalog loaded");

    let state = AppState { config, catalog };

    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // - /health: liveness with app name/version
    // - /ready: catalog loaded and non-empty
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    let server_config = state.config.server.clone();
    let shutdown_timeout = state.config.shutdown_timeout;
    info!(
        "Starting parking API with graceful shutdown ({:?} timeout)",
        shutdown_timeout
    );

    create_production_app(app, &server_config, shutdown_timeout, async move {
        info!(lots = state.catalog.len(), "Releasing lot catalog");
        drop(state);
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Parking API shutdown complete");
    Ok(())
}
