use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to an uploaded file held by a blob store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
    /// Identifier inside the blob store
    pub id: Uuid,

    /// Original filename, used when the file is handed back
    pub filename: String,

    /// Size in bytes
    pub size: usize,
}
