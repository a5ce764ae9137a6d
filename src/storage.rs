//! Key-value storages that can back an [`EventStore`](crate::store::EventStore)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::traits::KeyValueStorage;

/// A storage that keeps each value in its own JSON file, inside a given folder
#[derive(Debug, Clone, PartialEq)]
pub struct FileStorage {
    backing_folder: PathBuf,
}

impl FileStorage {
    /// Create a storage in `folder`. The folder is created when the first value is written
    pub fn new(folder: &Path) -> Self {
        Self { backing_folder: PathBuf::from(folder) }
    }

    /// Get the path to the default data folder
    pub fn default_folder() -> PathBuf {
        match dirs::data_dir() {
            Some(dir) => dir.join("month-planner"),
            None => PathBuf::from(".month-planner"),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.backing_folder
    }

    fn file_for(&self, key: &str) -> PathBuf {
        let file_name = format!("{}.json", sanitize_filename::sanitize(key));
        self.backing_folder.join(file_name)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.file_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No stored value at {:?}", path);
                Ok(None)
            },
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.backing_folder)?;
        let path = self.file_for(key);
        std::fs::write(&path, value)?;
        log::trace!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}


/// A storage that only lives in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
