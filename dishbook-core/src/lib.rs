//! Dishbook Core Library
//!
//! Models and local persistence for a shared dish catalog: dishes, categories,
//! orders and favorites, with JSON export and import.

pub mod models;
pub mod stats;
pub mod storage;
pub mod store;

pub use models::{Dish, DishPatch, NewDish, Order, OrderedDish};
pub use stats::{CategoryCount, DishCount, Stats};
pub use storage::{BackendError, Collection, FileStore, KeyValueStore, MemoryStore};
pub use store::{
    Bundle, ImportMode, ImportSummary, Store, StoreError, BUNDLE_VERSION, DEFAULT_CATEGORIES,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
