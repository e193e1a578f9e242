//! Storage configuration loaded from environment variables
//!
//! Recognised variables:
//! - `STORAGE_BACKEND`: `sqlite` (default) or `memory`
//! - `DB_SQLITE_PATH`: path of the SQLite file (default `data/health_tracker.db`)
//! - `DB_MAX_CONNECTIONS`: pool size (default 4)
//! - `DB_TIMEOUT_SECONDS`: connection timeout (default 30)

use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::info;

use super::DatabaseError;

/// Default location of the SQLite file
pub const DEFAULT_SQLITE_PATH: &str = "data/health_tracker.db";

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local map, lost on restart
    Memory,
    /// SQLite file through an r2d2 pool
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "in_memory" => Ok(StorageBackend::Memory),
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err(DatabaseError::UnsupportedStorageBackend(s.to_string())),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Which backend holds the namespaced values
    pub backend: StorageBackend,
    /// Path to SQLite database file
    pub sqlite_path: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            sqlite_path: DEFAULT_SQLITE_PATH.to_string(),
            max_connections: 4,
            timeout_seconds: 30,
        }
    }
}

impl StorageConfig {
    /// Create an in-memory configuration, mostly useful for tests
    pub fn in_memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            ..Self::default()
        }
    }

    /// Create a new storage configuration from environment variables
    pub fn from_env() -> Result<Self, DatabaseError> {
        let defaults = Self::default();

        // Get backend from environment or default to SQLite
        let backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse::<StorageBackend>()?,
            Err(_) => defaults.backend,
        };

        let sqlite_path = env::var("DB_SQLITE_PATH").unwrap_or(defaults.sqlite_path);

        // Invalid numbers fall back to the defaults
        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_connections);

        let timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_seconds);

        info!(
            "Storage configuration: backend={}, sqlite_path={}, max_connections={}, timeout={}s",
            backend, sqlite_path, max_connections, timeout_seconds
        );

        Ok(StorageConfig {
            backend,
            sqlite_path,
            max_connections,
            timeout_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("sqlite".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
        assert_eq!("Memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!(matches!(
            "postgres".parse::<StorageBackend>(),
            Err(DatabaseError::UnsupportedStorageBackend(_))
        ));
    }

    #[test]
    fn test_default_config() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Sqlite);
        assert_eq!(config.sqlite_path, DEFAULT_SQLITE_PATH);
        assert_eq!(StorageConfig::in_memory().backend, StorageBackend::Memory);
    }
}
