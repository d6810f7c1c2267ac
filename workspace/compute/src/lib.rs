//! Monthly aggregation and series materialization on top of the store.

pub mod categories;
pub mod error;
pub mod income;
pub mod period;
pub mod series;
pub mod summary;

pub use error::{ComputeError, Result};
pub use period::{YearMonth, month_range};

#[cfg(test)]
pub(crate) mod testing {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};

    pub async fn setup_db() -> DatabaseConnection {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .try_init();

        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");
        Migrator::up(&db, None).await.expect("Migrations failed.");
        db
    }
}
