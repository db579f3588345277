//! Database connection management.
//!
//! A run uses one SQLite connection for loading and for the verification
//! queries. The pool is capped at a single connection so that every
//! statement sees the same handle (and, for `sqlite::memory:`, the same
//! database).

use std::path::Path;
use std::str::FromStr;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error_handling::StorageError;

/// Opens the database file at `db_path`, creating it if needed.
///
/// The path is handed to SQLite as a filename, not a URL, so it may contain
/// `?`, `#` or non-UTF-8 bytes. The parent directory must exist. Callers
/// close the pool with `SqlitePool::close` when the run ends, on success or
/// failure.
pub async fn init_db_pool_with_path(db_path: &Path) -> Result<SqlitePool, StorageError> {
    if db_path.exists() {
        info!("Database file {} already exists.", db_path.display());
    } else {
        info!("Creating database file {}.", db_path.display());
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);
    connect(options).await
}

/// Opens a private in-memory database.
pub async fn init_memory_pool() -> Result<SqlitePool, StorageError> {
    connect(SqliteConnectOptions::from_str("sqlite::memory:")?).await
}

async fn connect(options: SqliteConnectOptions) -> Result<SqlitePool, StorageError> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            StorageError::SqlError(e)
        })
}
