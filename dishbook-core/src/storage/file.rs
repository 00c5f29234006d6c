//! File-backed key-value store.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use super::backend::{BackendError, KeyValueStore};

/// Stores each key as `<key>.json` in a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `data_dir`. The directory is created on first write.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the full path for a key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// Checks if a key exists on disk.
    pub fn exists(&self, key: &str) -> bool {
        self.path(key).exists()
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError> {
        let path = self.path(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BackendError::Io(path, e)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| BackendError::Io(self.data_dir.clone(), e))?;

        let path = self.path(key);
        fs::write(&path, value).map_err(|e| BackendError::Io(path.clone(), e))?;
        debug!(path = %path.display(), bytes = value.len(), "wrote key");

        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), BackendError> {
        let path = self.path(key);

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BackendError::Io(path, e)),
        }
    }
}
