use chrono::Utc;
use rusqlite::OptionalExtension;
use tracing::debug;

use crate::database::DatabasePool;
use super::errors::StorageError;
use super::KeyValueStorage;

/// Key-value storage persisted in the `key_value_store` SQLite table
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: DatabasePool,
}

impl SqliteStorage {
    /// Wrap an already migrated pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        debug!("Reading key from SQLite storage: {}", key);

        match &self.pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;
                let value = conn
                    .query_row(
                        "SELECT value FROM key_value_store WHERE key = ?1",
                        [key],
                        |row| row.get::<_, String>(0),
                    )
                    .optional()?;
                Ok(value)
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!("Writing key to SQLite storage: {} ({} bytes)", key, value.len());

        match &self.pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                // Single statement, so the previous value survives any failure
                conn.execute(
                    "INSERT INTO key_value_store (key, value, updated_at)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = excluded.updated_at",
                    (key, value, Utc::now().to_rfc3339()),
                )?;

                Ok(())
            }
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        debug!("Removing key from SQLite storage: {}", key);

        match &self.pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;
                conn.execute("DELETE FROM key_value_store WHERE key = ?1", [key])?;
                Ok(())
            }
        }
    }
}
