//! Key-value persistence for Dishbook.
//!
//! Each collection is stored as one serialized JSON array under its own key:
//! - `dishes`: array of Dish objects
//! - `categories`: array of category names
//! - `orders`: array of Order objects, newest first
//! - `favorites`: array of dish ids
//!
//! [`FileStore`] keeps each key in `<data_dir>/<key>.json`; [`MemoryStore`] keeps
//! everything in process.

mod backend;
mod collection;
mod file;
mod memory;

pub use backend::{BackendError, KeyValueStore};
pub use collection::Collection;
pub use file::FileStore;
pub use memory::MemoryStore;
