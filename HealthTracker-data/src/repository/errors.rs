use thiserror::Error;

use crate::storage::StorageError;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Backend read or write failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Sequence could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
