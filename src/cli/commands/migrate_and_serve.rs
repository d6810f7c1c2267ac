use anyhow::Result;
use tracing::{error, info};

use super::initdb::run_migrations;
use super::serve::run_server;
use crate::config::{Settings, build_app_state};

pub async fn migrate_and_serve(settings: Settings) -> Result<()> {
    info!("Applying database migrations and starting server");

    // The migrated connection is reused for serving
    let db = run_migrations(&settings.database_url).await?;
    let state = match build_app_state(db, &settings).await {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    run_server(state, &settings.bind_address).await
}
