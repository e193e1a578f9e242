// Repository module structure
pub mod errors;
mod namespace;
mod reading_store;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use namespace::{Namespace, Reading};
pub use reading_store::ReadingStore;
