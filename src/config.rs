use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use sea_orm::{Database, DatabaseConnection};
use serde::Deserialize;
use tracing::{debug, info};

use crate::schemas::AppState;
use crate::storage::LocalObjectStore;

const DEFAULT_DATABASE_URL: &str = "sqlite://monthbook.db?mode=rwc";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_STORAGE_DIR: &str = "./storage";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000/files";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime settings.
///
/// Layered from built-in defaults, an optional `monthbook.toml` (or the
/// file given with `--config`) and finally the environment, e.g.
/// `DATABASE_URL` or `STORAGE_DIR`. A `.env` file is loaded first.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    /// User every request acts as while the service runs single-tenant
    pub default_user_id: i32,
    /// Directory report PDFs are written to and served from
    pub storage_dir: PathBuf,
    /// URL prefix under which `storage_dir` is reachable
    pub public_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            default_user_id: 1,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_sources(config_path, Environment::default().try_parsing(true))
    }

    fn from_sources(config_path: Option<&Path>, environment: Environment) -> Result<Self> {
        let file = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("monthbook").required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("default_user_id", 1)?
            .set_default("storage_dir", DEFAULT_STORAGE_DIR)?
            .set_default("public_base_url", DEFAULT_PUBLIC_BASE_URL)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
            .add_source(file)
            .add_source(environment)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        debug!(?settings, "Configuration loaded");
        Ok(settings)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Connect to the configured database and build the application state
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;
    build_app_state(db, settings).await
}

/// Application state around an existing connection
pub async fn build_app_state(db: DatabaseConnection, settings: &Settings) -> Result<AppState> {
    tokio::fs::create_dir_all(&settings.storage_dir)
        .await
        .with_context(|| format!("Failed to create storage directory {}", settings.storage_dir.display()))?;

    let storage = LocalObjectStore::new(&settings.storage_dir, &settings.public_base_url);

    Ok(AppState {
        db,
        storage: Arc::new(storage),
        files_dir: settings.storage_dir.clone(),
        default_user_id: settings.default_user_id,
        request_timeout: settings.request_timeout(),
    })
}
