use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::errors::StorageError;
use super::KeyValueStorage;

/// In-memory key-value storage, lost when the process exits
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    /// Stored values keyed by namespace
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let store = self.values.lock()?;
        Ok(store.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut store = self.values.lock()?;
        store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut store = self.values.lock()?;
        store.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_whole_value() {
        let storage = InMemoryStorage::new();
        storage.set("sugarLevels", "[1]").unwrap();
        storage.set("sugarLevels", "[1,2]").unwrap();
        assert_eq!(storage.get("sugarLevels").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_clones_share_values() {
        let storage = InMemoryStorage::new();
        let clone = storage.clone();
        clone.set("bloodPressure", "[]").unwrap();
        assert!(storage.get("bloodPressure").unwrap().is_some());

        storage.remove("bloodPressure").unwrap();
        assert!(clone.get("bloodPressure").unwrap().is_none());
    }
}
