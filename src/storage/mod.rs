//! Patient collection persistence.
//!
//! The whole collection is loaded and saved as one unit; there are no
//! partial writes and no locking. Callers load, mutate in memory, then save.

mod file;
pub use file::FileStore;

use indexmap::IndexMap;
use std::fmt;

use crate::patient::PatientRecord;

/// The full persisted collection, keyed by patient id.
///
/// Iteration preserves insertion order (and, after a reload, file order),
/// which sorted views rely on for tie-breaking.
pub type Collection = IndexMap<String, PatientRecord>;

#[derive(Debug)]
pub enum StorageError {
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Load/save interface over the persisted collection.
pub trait PatientStore: Send + Sync {
    fn load(&self) -> Result<Collection, StorageError>;
    fn save(&self, collection: &Collection) -> Result<(), StorageError>;
}
