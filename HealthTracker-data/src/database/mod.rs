use thiserror::Error;

// Database modules
pub mod config;
#[cfg(feature = "sqlite")]
pub mod connection;
#[cfg(feature = "sqlite")]
pub mod migrations;

// Re-export database configuration and connection functions
pub use config::{StorageBackend, StorageConfig};
#[cfg(feature = "sqlite")]
pub use connection::*;

/// Database error enum
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite error
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    /// Database pool already initialized
    #[error("Database pool is already initialized")]
    PoolAlreadyInitialized,

    /// Unsupported storage backend
    #[error("Unsupported storage backend: {0}")]
    UnsupportedStorageBackend(String),

    /// Migration error
    #[error("Database migration error: {0}")]
    MigrationError(String),
}
