use thiserror::Error;
use validator::Validate;

use health_tracker_data::repository::RepositoryError;
use health_tracker_data::storage::StorageError;

/// Errors returned by the page services and the reminder scheduler
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required field was missing or malformed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persisting or reading data failed
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// Shared in-memory state could not be locked
    #[error("Lock error: {0}")]
    LockError(String),

    /// Operation not allowed in the current lifecycle state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        ServiceError::RepositoryError(err.to_string())
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::RepositoryError(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ServiceError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        ServiceError::LockError(err.to_string())
    }
}

/// Run the derived validation rules and fold the failures into one message
pub fn validate_request<R: Validate>(request: &R) -> Result<(), ServiceError> {
    if let Err(validation_errors) = request.validate() {
        let mut fields: Vec<_> = validation_errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let error_message = fields
            .iter()
            .map(|(field, errors)| {
                let error_msgs: Vec<String> = errors
                    .iter()
                    .map(|err| {
                        if let Some(msg) = &err.message {
                            msg.to_string()
                        } else {
                            format!("Invalid {}", field)
                        }
                    })
                    .collect();
                format!("{}: {}", field, error_msgs.join(", "))
            })
            .collect::<Vec<String>>()
            .join("; ");

        return Err(ServiceError::ValidationError(error_message));
    }

    Ok(())
}
