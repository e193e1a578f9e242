use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use super::errors::RepositoryError;
use super::namespace::{Namespace, Reading};
use crate::storage::{InMemoryStorage, KeyValueStorage};

/// Persistence of append-ordered reading sequences, one per namespace
///
/// Each namespace holds a JSON array. Reads fail soft: an absent, unreadable or
/// malformed value is the empty sequence. Writes always replace the whole array.
#[derive(Debug, Clone)]
pub struct ReadingStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl Default for ReadingStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl ReadingStore {
    /// Create a store over the given backend
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Create a store over a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStorage::new()))
    }

    /// Load the sequence stored under `namespace`, in append order
    pub fn load<T: DeserializeOwned>(&self, namespace: Namespace) -> Vec<T> {
        let raw = match self.storage.get(namespace.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored value for namespace {}", namespace);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to read namespace {}, treating as empty: {}", namespace, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(readings) => {
                debug!("Loaded {} entries from namespace {}", readings.len(), namespace);
                readings
            }
            Err(e) => {
                warn!("Stored value for namespace {} is malformed, treating as empty: {}", namespace, e);
                Vec::new()
            }
        }
    }

    /// Append `reading` to the sequence under `namespace` and persist the result
    ///
    /// Returns the full sequence as now stored; callers should hold on to it
    /// instead of any copy they had before.
    pub fn append<T>(&self, namespace: Namespace, reading: T) -> Result<Vec<T>, RepositoryError>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut readings = self.load::<T>(namespace);
        readings.push(reading);
        self.save(namespace, &readings)?;
        Ok(readings)
    }

    fn save<T: Serialize>(&self, namespace: Namespace, readings: &[T]) -> Result<(), RepositoryError> {
        // Serialize before touching storage so a failure leaves the old value in place
        let raw = serde_json::to_string(readings)?;

        self.storage.set(namespace.key(), &raw).map_err(|e| {
            error!("Failed to persist namespace {}: {}", namespace, e);
            RepositoryError::from(e)
        })?;

        debug!("Persisted {} entries to namespace {}", readings.len(), namespace);
        Ok(())
    }

    /// Load the sequence for a typed reading
    pub fn load_readings<T: Reading>(&self) -> Vec<T> {
        self.load(T::NAMESPACE)
    }

    /// Append a typed reading under its own namespace
    pub fn append_reading<T: Reading>(&self, reading: T) -> Result<Vec<T>, RepositoryError> {
        self.append(T::NAMESPACE, reading)
    }

    /// Borrow the underlying backend
    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.storage
    }
}
