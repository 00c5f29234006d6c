//! In-process key-value store, used by tests and for throwaway sessions.

use std::collections::HashMap;

use super::backend::{BackendError, KeyValueStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once the stored values exceed `bytes` in total.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Total size of all stored values in bytes.
    pub fn used_bytes(&self) -> usize {
        self.items.values().map(String::len).sum()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        if let Some(limit) = self.quota {
            let current = self.items.get(key).map_or(0, String::len);
            if self.used_bytes() - current + value.len() > limit {
                return Err(BackendError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), BackendError> {
        self.items.remove(key);
        Ok(())
    }
}
