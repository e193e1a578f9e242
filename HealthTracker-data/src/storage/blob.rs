use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use tracing::debug;
use uuid::Uuid;

use crate::models::BlobRef;
use super::errors::StorageError;

/// Storage for opaque uploaded files
///
/// Contents are never inspected; a blob is only ever stored and handed back.
pub trait BlobStore: Send + Sync + Debug {
    /// Store the bytes and return a reference to them
    fn put(&self, filename: &str, bytes: Vec<u8>) -> Result<BlobRef, StorageError>;

    /// Fetch the bytes behind a reference
    fn get(&self, blob: &BlobRef) -> Result<Option<Vec<u8>>, StorageError>;

    /// Drop the bytes behind a reference, if present
    fn remove(&self, blob: &BlobRef) -> Result<(), StorageError>;
}

/// Blob store held in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    blobs: Arc<Mutex<HashMap<Uuid, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Create an empty blob store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        match self.blobs.lock() {
            Ok(blobs) => blobs.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for InMemoryBlobStore {
    fn put(&self, filename: &str, bytes: Vec<u8>) -> Result<BlobRef, StorageError> {
        let blob = BlobRef {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            size: bytes.len(),
        };

        debug!("Storing blob {} ({}, {} bytes)", blob.id, blob.filename, blob.size);

        let mut blobs = self.blobs.lock()?;
        blobs.insert(blob.id, bytes);
        Ok(blob)
    }

    fn get(&self, blob: &BlobRef) -> Result<Option<Vec<u8>>, StorageError> {
        let blobs = self.blobs.lock()?;
        Ok(blobs.get(&blob.id).cloned())
    }

    fn remove(&self, blob: &BlobRef) -> Result<(), StorageError> {
        debug!("Removing blob {} ({})", blob.id, blob.filename);
        self.blobs.lock()?.remove(&blob.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let store = InMemoryBlobStore::new();
        let blob = store.put("scan.pdf", vec![1, 2, 3]).unwrap();

        assert_eq!(blob.filename, "scan.pdf");
        assert_eq!(blob.size, 3);
        assert_eq!(store.get(&blob).unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_same_file_twice_gets_distinct_refs() {
        let store = InMemoryBlobStore::new();
        let first = store.put("scan.pdf", vec![1]).unwrap();
        let second = store.put("scan.pdf", vec![1]).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_remove() {
        let store = InMemoryBlobStore::new();
        let blob = store.put("scan.pdf", vec![1]).unwrap();
        assert_eq!(store.len(), 1);

        store.remove(&blob).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.get(&blob).unwrap(), None);
    }

    #[test]
    fn test_unknown_ref() {
        let store = InMemoryBlobStore::new();
        let missing = BlobRef {
            id: Uuid::new_v4(),
            filename: "gone.png".to_string(),
            size: 0,
        };
        assert_eq!(store.get(&missing).unwrap(), None);
    }
}
