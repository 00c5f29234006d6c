//! Store error types.

use thiserror::Error;

use crate::storage::{BackendError, Collection};

/// Errors returned by mutating store operations.
///
/// Reads never fail: an unreadable collection is logged and treated as empty.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Backend(#[from] BackendError),

    #[error("Failed to serialize {collection}: {source}")]
    Serialize {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid import file: {0}")]
    InvalidBundle(String),

    #[error("Invalid dish: {0}")]
    InvalidDish(String),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Category already exists: {0}")]
    DuplicateCategory(String),
}
