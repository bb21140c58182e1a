use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{Collection, PatientStore, StorageError};

/// JSON-file backed store.
///
/// Every save rewrites the whole collection through a temporary file that
/// is renamed into place, so readers never observe a half-written file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Opens the store, creating the parent directory and seeding an empty
    /// collection if the data file does not exist yet.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Unavailable(format!("Failed to create data directory: {}", e))
                })?;
            }
        }

        let store = FileStore { path };
        if !store.path.exists() {
            store.save(&Collection::new())?;
        }
        Ok(store)
    }
}

impl PatientStore for FileStore {
    fn load(&self) -> Result<Collection, StorageError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            StorageError::Unavailable(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            StorageError::Unavailable(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    fn save(&self, collection: &Collection) -> Result<(), StorageError> {
        let serialized = serde_json::to_vec(collection)
            .map_err(|e| StorageError::Unavailable(format!("Serialization failed: {}", e)))?;

        // Write to a temporary file first, then rename into place.
        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path)
            .map_err(|e| StorageError::Unavailable(format!("Failed to create file: {}", e)))?;

        file.write_all(&serialized)
            .map_err(|e| StorageError::Unavailable(format!("Failed to write data: {}", e)))?;

        file.sync_all()
            .map_err(|e| StorageError::Unavailable(format!("Failed to sync data: {}", e)))?;

        fs::rename(&temp_path, &self.path)
            .map_err(|e| StorageError::Unavailable(format!("Failed to rename file: {}", e)))?;

        Ok(())
    }
}
