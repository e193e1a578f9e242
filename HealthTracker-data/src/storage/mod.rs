// Storage module structure
pub mod errors;
mod blob;
mod in_memory;
#[cfg(feature = "sqlite")]
mod sqlite;

use std::fmt::Debug;
use std::sync::Arc;

use tracing::info;

use crate::database::{DatabaseError, StorageBackend, StorageConfig};

// Re-export commonly used types
pub use blob::{BlobStore, InMemoryBlobStore};
pub use errors::StorageError;
pub use in_memory::InMemoryStorage;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;

/// Whole-value string storage keyed by namespace
///
/// Values are always read and written in full; there are no partial updates.
pub trait KeyValueStorage: Send + Sync + Debug {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`, if any
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Open the configured storage backend
pub fn open_storage(config: &StorageConfig) -> Result<Arc<dyn KeyValueStorage>, DatabaseError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Ok(Arc::new(InMemoryStorage::new()))
        }
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => {
            info!("Using SQLite storage at {}", config.sqlite_path);
            let pool = crate::database::create_sqlite_pool(config)?;
            Ok(Arc::new(SqliteStorage::new(pool)))
        }
        #[cfg(not(feature = "sqlite"))]
        StorageBackend::Sqlite => Err(DatabaseError::UnsupportedStorageBackend(
            "sqlite (crate built without the sqlite feature)".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_memory_storage() {
        let storage = open_storage(&StorageConfig::in_memory()).unwrap();
        storage.set("key", "value").unwrap();
        assert_eq!(storage.get("key").unwrap().as_deref(), Some("value"));
    }
}
