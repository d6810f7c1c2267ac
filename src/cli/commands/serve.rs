use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{debug, info, instrument, warn};

use crate::config::{Settings, initialize_app_state};
use crate::router::create_router;
use crate::schemas::AppState;

#[instrument(skip_all, fields(bind_address = %settings.bind_address))]
pub async fn serve(settings: Settings) -> Result<()> {
    debug!("Storage directory: {}", settings.storage_dir.display());

    let state = initialize_app_state(&settings)
        .await
        .context("Failed to initialize application state")?;

    run_server(state, &settings.bind_address).await
}

/// Binds the listener and serves the router until Ctrl-C.
pub(crate) async fn run_server(state: AppState, bind_address: &str) -> Result<()> {
    let user_id = state.default_user_id;
    let app = create_router(state);

    let listener = TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind to address {bind_address}"))?;

    info!("Monthbook API listening on http://{} for user {}", bind_address, user_id);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
