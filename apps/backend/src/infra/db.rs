//! Database connection and bootstrap.

use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

/// Connect to the database at `url`.
///
/// In-memory SQLite gets a single-connection pool: every pooled connection
/// would otherwise see its own empty database.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(5));
    if url.starts_with("sqlite::memory:") {
        opts.max_connections(1).min_connections(1);
    }

    Database::connect(opts)
        .await
        .map_err(|e| AppError::StorageUnavailable {
            detail: format!("failed to connect to database: {e}"),
        })
}

/// Single entrypoint used by the state builder: connect, then bring the
/// schema up to date.
pub async fn bootstrap_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(url).await?;
    Migrator::up(&conn, None)
        .await
        .map_err(|e| AppError::internal(format!("migration failed: {e}")))?;
    info!("database connected and migrated");
    Ok(conn)
}
