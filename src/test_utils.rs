use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::router::create_router;
use crate::schemas::AppState;
use crate::storage::LocalObjectStore;

pub const TEST_USER_ID: i32 = 1;

/// Create an in-memory SQLite database for testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// A running test server together with the directory backing its object store.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub files: TempDir,
}

/// Create AppState for testing, storing blobs below `files`
pub async fn setup_test_app_state(files: &TempDir, user_id: i32) -> AppState {
    let db = setup_test_db().await;
    let storage = LocalObjectStore::new(files.path(), "http://localhost/files");

    AppState {
        db,
        storage: Arc::new(storage),
        files_dir: files.path().to_path_buf(),
        default_user_id: user_id,
        request_timeout: Duration::from_secs(30),
    }
}

/// Initialize tracing for tests with output to STDERR.
///
/// The log level is taken from RUST_LOG and defaults to WARN.
fn init_test_tracing() {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_for_user(TEST_USER_ID).await
}

pub async fn setup_test_app_for_user(user_id: i32) -> TestApp {
    init_test_tracing();

    let files = tempfile::tempdir().expect("Failed to create storage directory");
    let state = setup_test_app_state(&files, user_id).await;
    let server = TestServer::new(create_router(state.clone())).expect("Failed to start test server");

    TestApp { server, state, files }
}
