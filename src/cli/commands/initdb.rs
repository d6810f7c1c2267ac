use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, info, instrument};

/// Connects to the database and applies every pending migration.
pub async fn run_migrations(database_url: &str) -> Result<DatabaseConnection> {
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{database_url}'"))?;

    let pending = Migrator::get_pending_migrations(&db)
        .await
        .context("Failed to read migration status")?;
    if pending.is_empty() {
        debug!("Schema is up to date");
        return Ok(db);
    }

    info!("Applying {} pending migration(s)", pending.len());
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;

    Ok(db)
}

#[instrument(skip(database_url))]
pub async fn init_database(database_url: &str) -> Result<()> {
    run_migrations(database_url).await?;
    info!("Database initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn test_run_migrations_creates_tables() {
        let db = run_migrations("sqlite::memory:").await.unwrap();
        for table in ["categories", "monthly_income", "expenses", "reports"] {
            let result = db
                .execute_unprepared(&format!("SELECT COUNT(*) FROM {table}"))
                .await;
            assert!(result.is_ok(), "table {table} should exist");
        }
    }

    #[tokio::test]
    async fn test_bad_url_fails() {
        assert!(run_migrations("notadb://nowhere").await.is_err());
    }
}
