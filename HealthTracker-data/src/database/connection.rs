//! SQLite connection management for the health tracker
//!
//! A process-wide pool can be initialised once with [`initialize_database_pool`];
//! callers that need an isolated database (tests, tools) build one directly
//! with [`create_sqlite_pool`].

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use tracing::{error, info, warn};

use super::config::StorageConfig;
use super::migrations::run_sqlite_migrations;
use super::DatabaseError;

/// Global database pool used throughout the application
static DB_POOL: OnceCell<DatabasePool> = OnceCell::new();

/// Pooled SQLite connections
pub type SqlitePool = r2d2::Pool<SqliteConnectionManager>;

/// Database connection pool
#[derive(Debug, Clone)]
pub enum DatabasePool {
    /// SQLite connection pool
    SQLite(Arc<SqlitePool>),
}

/// Initialize the global database connection pool
pub fn initialize_database_pool(config: &StorageConfig) -> Result<DatabasePool, DatabaseError> {
    if DB_POOL.get().is_some() {
        return Err(DatabaseError::PoolAlreadyInitialized);
    }

    let pool = create_sqlite_pool(config)?;

    DB_POOL
        .set(pool.clone())
        .map_err(|_| DatabaseError::PoolAlreadyInitialized)?;

    Ok(pool)
}

/// Create a migrated SQLite pool for the configured file
pub fn create_sqlite_pool(config: &StorageConfig) -> Result<DatabasePool, DatabaseError> {
    let sqlite_path = &config.sqlite_path;

    info!("Initializing SQLite database at: {}", sqlite_path);

    // Create parent directory if it doesn't exist
    if let Some(parent) = Path::new(sqlite_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create directory: {}, falling back to in-memory database", e);
                return create_in_memory_sqlite_pool(config);
            }
        }
    }

    let manager = SqliteConnectionManager::file(sqlite_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);

    let pool = match r2d2::Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)
    {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to create SQLite connection pool: {}", e);
            warn!("Falling back to in-memory SQLite database");
            return create_in_memory_sqlite_pool(config);
        }
    };

    let pool = DatabasePool::SQLite(Arc::new(pool));
    run_migrations(&pool)?;

    info!("SQLite connection pool created successfully");
    Ok(pool)
}

/// Create a migrated in-memory SQLite pool
///
/// Every in-memory connection is its own database, so the pool holds exactly one.
pub fn create_in_memory_sqlite_pool(config: &StorageConfig) -> Result<DatabasePool, DatabaseError> {
    info!("Initializing in-memory SQLite database");

    let manager = SqliteConnectionManager::memory();

    let pool = r2d2::Pool::builder()
        .max_size(1)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)?;

    let pool = DatabasePool::SQLite(Arc::new(pool));
    run_migrations(&pool)?;

    info!("In-memory SQLite database initialized successfully");
    Ok(pool)
}

/// Run database migrations
fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    info!("Running database migrations");

    match pool {
        DatabasePool::SQLite(pool) => {
            let conn = pool.get()?;
            run_sqlite_migrations(&conn).map_err(DatabaseError::MigrationError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sqlite_pool_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tracker.db");
        let config = StorageConfig {
            sqlite_path: path.to_string_lossy().to_string(),
            ..StorageConfig::default()
        };

        let pool = create_sqlite_pool(&config).unwrap();
        assert!(path.exists());

        let DatabasePool::SQLite(pool) = pool;
        let conn = pool.get().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'key_value_store'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_in_memory_pool_is_migrated() {
        let pool = create_in_memory_sqlite_pool(&StorageConfig::in_memory()).unwrap();
        let DatabasePool::SQLite(pool) = pool;
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO key_value_store (key, value, updated_at) VALUES ('k', 'v', 'now')",
            [],
        )
        .unwrap();
    }
}
