use std::io;
use std::path::PathBuf;

/// A string key-value store, the persistence primitive underneath [`crate::Store`].
pub trait KeyValueStore {
    /// Returns `Ok(None)` if the key has never been written or was removed.
    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Replaces the whole value stored under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), BackendError>;
}

/// Errors raised by a key-value backend.
#[derive(Debug)]
pub enum BackendError {
    /// I/O error reading or writing a file.
    Io(PathBuf, io::Error),
    /// The write would exceed the backend's capacity.
    QuotaExceeded { key: String, limit: usize },
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Io(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            BackendError::QuotaExceeded { key, limit } => {
                write!(
                    f,
                    "Storage quota of {} bytes exceeded while writing '{}'",
                    limit, key
                )
            }
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Io(_, e) => Some(e),
            BackendError::QuotaExceeded { .. } => None,
        }
    }
}
