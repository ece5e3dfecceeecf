use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod adapters;
mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!(
        "Seeding ledgers: {} ammunition, {} fuel, {} vehicle kinds",
        config.seed.ammunition.len(),
        config.seed.fuel.len(),
        config.seed.vehicles.len()
    );

    // Build the application state: seeded in-memory ledgers, the shared
    // usage log, and the personnel binding
    let state = AppState::from_config(config);

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes)
        .map_err(|e| eyre::eyre!("Router setup failed: {}", e))?;

    // Merge health endpoints into the app
    // - /health: liveness check with app name/version
    // - /ready: readiness check probing the ledgers and the usage log
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));

    info!("Starting quartermaster API");

    create_app(app, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Quartermaster API shutdown complete");
    Ok(())
}
