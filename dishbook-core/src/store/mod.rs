//! The local store adapter.
//!
//! [`Store`] maps the four logical collections onto a [`KeyValueStore`]. Every operation
//! reads a whole collection, changes it in memory and writes the whole collection back;
//! there are no partial or indexed writes. Nothing coordinates two stores opened on the
//! same backend, so concurrent writers lose updates (last writer wins).

mod bundle;
mod error;

pub use bundle::{Bundle, ImportMode, ImportSummary, BUNDLE_VERSION};
pub use error::StoreError;

use chrono::{SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{Dish, DishPatch, NewDish, Order, OrderedDish};
use crate::storage::{Collection, KeyValueStore};
use bundle::{merge_by_id, union};

/// Categories seeded on first run and after [`Store::clear_all`].
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Home Cooking",
    "Soups",
    "Noodles & Rice",
    "Desserts",
    "Drinks",
    "Snacks",
];

/// Key of the first-run marker. Its presence means default seeding already happened.
pub const INIT_MARKER_KEY: &str = "initialized";

pub struct Store<B: KeyValueStore> {
    backend: B,
    default_categories: Vec<String>,
}

impl<B: KeyValueStore> Store<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            default_categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Overrides the category list used for seeding.
    pub fn with_default_categories(mut self, categories: Vec<String>) -> Self {
        self.default_categories = categories;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Runs first-use seeding.
    ///
    /// Default categories are written only when the first-run marker is missing and no
    /// category collection is stored at all. Returns true if seeding happened. Once the
    /// marker is set, an empty category collection stays empty. Stored categories are never
    /// overwritten, even if they cannot be parsed. A failed backend read is returned
    /// instead of being treated as a first run.
    pub fn init(&mut self) -> Result<bool, StoreError> {
        if self.backend.get_item(INIT_MARKER_KEY)?.is_some() {
            return Ok(false);
        }

        let seeded = if self.backend.get_item(Collection::Categories.key())?.is_none() {
            self.seed_default_categories()?;
            true
        } else {
            false
        };

        self.mark_initialized()?;
        Ok(seeded)
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.backend.get_item(INIT_MARKER_KEY), Ok(Some(_)))
    }

    fn mark_initialized(&mut self) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.backend.set_item(INIT_MARKER_KEY, &now)?;
        Ok(())
    }

    fn seed_default_categories(&mut self) -> Result<(), StoreError> {
        let defaults = self.default_categories.clone();
        info!(count = defaults.len(), "Seeding default categories");
        self.save(Collection::Categories, &defaults)
    }

    // ===== Raw collection access =====

    /// Reads a collection. Missing, unreadable or corrupt data reads as empty.
    pub fn get<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let raw = match self.backend.get_item(collection.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(%collection, error = %e, "Failed to read collection, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(%collection, error = %e, "Failed to parse collection, treating as empty");
                Vec::new()
            }
        }
    }

    /// Serializes and writes a whole collection, replacing what was stored.
    pub fn save<T: Serialize>(
        &mut self,
        collection: Collection,
        items: &[T],
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(items)
            .map_err(|source| StoreError::Serialize { collection, source })?;

        self.backend.set_item(collection.key(), &json).map_err(|e| {
            warn!(%collection, error = %e, "Failed to save collection");
            StoreError::from(e)
        })?;

        debug!(%collection, count = items.len(), "Saved collection");
        Ok(())
    }

    pub fn dishes(&self) -> Vec<Dish> {
        self.get(Collection::Dishes)
    }

    pub fn categories(&self) -> Vec<String> {
        self.get(Collection::Categories)
    }

    /// Orders, newest first.
    pub fn orders(&self) -> Vec<Order> {
        self.get(Collection::Orders)
    }

    pub fn favorites(&self) -> Vec<String> {
        self.get(Collection::Favorites)
    }

    // ===== Dishes =====

    /// Validates and stores a new dish, assigning its id and creation time.
    ///
    /// At least one of the dish's categories must exist when it is created.
    pub fn add_dish(&mut self, new_dish: NewDish) -> Result<Dish, StoreError> {
        if new_dish.name.trim().is_empty() {
            return Err(StoreError::InvalidDish(
                "dish name cannot be empty".to_string(),
            ));
        }
        if new_dish.categories.is_empty() {
            return Err(StoreError::InvalidDish(
                "a dish needs at least one category".to_string(),
            ));
        }

        let known = self.categories();
        if !new_dish.categories.iter().any(|c| known.contains(c)) {
            return Err(StoreError::InvalidDish(format!(
                "none of the categories exist: {}",
                new_dish.categories.join(", ")
            )));
        }

        let dish = new_dish.into_dish(new_id(), Utc::now());
        let mut dishes = self.dishes();
        dishes.push(dish.clone());
        self.save(Collection::Dishes, &dishes)?;

        info!(id = %dish.id, name = %dish.name, "Added dish");
        Ok(dish)
    }

    /// Applies `patch` to the dish with `id`.
    ///
    /// Returns `Ok(None)` without writing anything if no dish has that id.
    pub fn update_dish(
        &mut self,
        id: &str,
        patch: DishPatch,
    ) -> Result<Option<Dish>, StoreError> {
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(StoreError::InvalidDish(
                "dish name cannot be empty".to_string(),
            ));
        }

        let mut dishes = self.dishes();
        let Some(dish) = dishes.iter_mut().find(|d| d.id == id) else {
            debug!(id, "Update skipped, dish not found");
            return Ok(None);
        };

        patch.apply(dish);
        let updated = dish.clone();
        self.save(Collection::Dishes, &dishes)?;

        info!(id, "Updated dish");
        Ok(Some(updated))
    }

    /// Removes the dish with `id`. Unknown ids are not an error.
    ///
    /// Favorites and past orders that reference the dish are left alone.
    pub fn delete_dish(&mut self, id: &str) -> Result<(), StoreError> {
        let mut dishes = self.dishes();
        dishes.retain(|d| d.id != id);
        self.save(Collection::Dishes, &dishes)
    }

    pub fn get_dish_by_id(&self, id: &str) -> Option<Dish> {
        self.dishes().into_iter().find(|d| d.id == id)
    }

    // ===== Categories =====

    pub fn add_category(&mut self, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidCategory(
                "category name cannot be empty".to_string(),
            ));
        }

        let mut categories = self.categories();
        if categories.iter().any(|c| c == name) {
            return Err(StoreError::DuplicateCategory(name.to_string()));
        }

        categories.push(name.to_string());
        self.save(Collection::Categories, &categories)
    }

    /// Removes the category. Dishes that still list it keep the dangling name.
    pub fn delete_category(&mut self, name: &str) -> Result<(), StoreError> {
        let mut categories = self.categories();
        categories.retain(|c| c != name);
        self.save(Collection::Categories, &categories)
    }

    // ===== Orders =====

    /// Stores a new order at the front of the history.
    pub fn add_order(&mut self, dishes: Vec<OrderedDish>) -> Result<Order, StoreError> {
        if dishes.is_empty() {
            return Err(StoreError::InvalidOrder(
                "an order needs at least one dish".to_string(),
            ));
        }

        let order = Order {
            id: new_id(),
            dishes,
            created_at: Utc::now(),
        };

        let mut orders = self.orders();
        orders.insert(0, order.clone());
        self.save(Collection::Orders, &orders)?;

        info!(id = %order.id, dishes = order.dishes.len(), "Placed order");
        Ok(order)
    }

    /// Places an order for the given dish ids, snapshotting their current names.
    pub fn order_dishes(&mut self, dish_ids: &[String]) -> Result<Order, StoreError> {
        let catalog = self.dishes();
        let mut snapshots = Vec::with_capacity(dish_ids.len());

        for id in dish_ids {
            let dish = catalog
                .iter()
                .find(|d| &d.id == id)
                .ok_or_else(|| StoreError::InvalidOrder(format!("dish not found: {}", id)))?;
            snapshots.push(OrderedDish::from(dish));
        }

        self.add_order(snapshots)
    }

    pub fn delete_order(&mut self, id: &str) -> Result<(), StoreError> {
        let mut orders = self.orders();
        orders.retain(|o| o.id != id);
        self.save(Collection::Orders, &orders)
    }

    // ===== Favorites =====

    /// Flips favorite membership for `dish_id` and returns the new state.
    pub fn toggle_favorite(&mut self, dish_id: &str) -> Result<bool, StoreError> {
        let mut favorites = self.favorites();

        let now_favorite = if favorites.iter().any(|f| f == dish_id) {
            favorites.retain(|f| f != dish_id);
            false
        } else {
            favorites.push(dish_id.to_string());
            true
        };

        self.save(Collection::Favorites, &favorites)?;
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, dish_id: &str) -> bool {
        self.favorites().iter().any(|f| f == dish_id)
    }

    // ===== Bulk =====

    /// Full snapshot of every collection.
    pub fn export_bundle(&self) -> Bundle {
        Bundle::snapshot(
            self.dishes(),
            self.categories(),
            self.orders(),
            self.favorites(),
        )
    }

    /// Applies a bundle. Collections absent from the bundle are never touched.
    ///
    /// Replace mode still drops repeated ids and values inside the bundle, keeping the
    /// first occurrence, so every stored collection stays free of duplicates.
    pub fn import_bundle(
        &mut self,
        bundle: Bundle,
        mode: ImportMode,
    ) -> Result<ImportSummary, StoreError> {
        let mut summary = ImportSummary::default();

        if let Some(incoming) = bundle.dishes {
            let (dishes, count) = match mode {
                ImportMode::Replace => merge_by_id(Vec::new(), incoming, |d| d.id.as_str()),
                ImportMode::Merge => merge_by_id(self.dishes(), incoming, |d| d.id.as_str()),
            };
            self.save(Collection::Dishes, &dishes)?;
            summary.dishes = count;
        }

        if let Some(incoming) = bundle.categories {
            let (categories, count) = match mode {
                ImportMode::Replace => union(Vec::new(), incoming),
                ImportMode::Merge => union(self.categories(), incoming),
            };
            self.save(Collection::Categories, &categories)?;
            summary.categories = count;
        }

        if let Some(incoming) = bundle.orders {
            let (orders, count) = match mode {
                ImportMode::Replace => merge_by_id(Vec::new(), incoming, |o| o.id.as_str()),
                ImportMode::Merge => merge_by_id(self.orders(), incoming, |o| o.id.as_str()),
            };
            self.save(Collection::Orders, &orders)?;
            summary.orders = count;
        }

        if let Some(incoming) = bundle.favorites {
            let (favorites, count) = match mode {
                ImportMode::Replace => union(Vec::new(), incoming),
                ImportMode::Merge => union(self.favorites(), incoming),
            };
            self.save(Collection::Favorites, &favorites)?;
            summary.favorites = count;
        }

        info!(%mode, records = summary.total(), "Imported bundle");
        Ok(summary)
    }

    /// Parses `text` and imports it. Malformed input is rejected before any write.
    pub fn import_json(
        &mut self,
        text: &str,
        mode: ImportMode,
    ) -> Result<ImportSummary, StoreError> {
        let bundle = Bundle::from_json(text)?;
        self.import_bundle(bundle, mode)
    }

    /// Removes every collection, then re-seeds the default categories.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            self.backend.remove_item(collection.key())?;
        }
        info!("Cleared all collections");

        if self.categories().is_empty() {
            self.seed_default_categories()?;
        }
        self.mark_initialized()
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
