use std::fmt;

use crate::patient::ValidationError;
use crate::storage::StorageError;

/// Everything a request can fail with.
///
/// Each variant surfaces directly to the caller as a client-facing failure;
/// nothing is retried or recovered internally. A storage failure is fatal
/// for the request.
#[derive(Debug)]
pub enum ServiceError {
    /// A field on the submitted record violated its constraints.
    Validation(ValidationError),
    /// Bad sort field or sort order on a sorted listing.
    InvalidQuery(String),
    /// No record under the requested id.
    NotFound(String),
    /// Create with an id that is already taken.
    Conflict(String),
    /// The backing store could not be read, parsed, or written.
    Storage(StorageError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Validation(err) => write!(f, "{}", err),
            ServiceError::InvalidQuery(msg) => write!(f, "{}", msg),
            ServiceError::NotFound(msg) => write!(f, "{}", msg),
            ServiceError::Conflict(msg) => write!(f, "{}", msg),
            ServiceError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<ValidationError> for ServiceError {
    fn from(error: ValidationError) -> Self {
        ServiceError::Validation(error)
    }
}

impl From<StorageError> for ServiceError {
    fn from(error: StorageError) -> Self {
        ServiceError::Storage(error)
    }
}
