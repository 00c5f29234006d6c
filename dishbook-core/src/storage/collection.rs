//! Logical collections and the keys they are stored under.

/// The four collections persisted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Dishes,
    Categories,
    Orders,
    Favorites,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Dishes,
        Collection::Categories,
        Collection::Orders,
        Collection::Favorites,
    ];

    /// Returns the storage key for this collection.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Dishes => "dishes",
            Collection::Categories => "categories",
            Collection::Orders => "orders",
            Collection::Favorites => "favorites",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_keys() {
        assert_eq!(Collection::Dishes.key(), "dishes");
        assert_eq!(Collection::Categories.key(), "categories");
        assert_eq!(Collection::Orders.key(), "orders");
        assert_eq!(Collection::Favorites.key(), "favorites");
    }

    #[test]
    fn test_keys_are_distinct() {
        let keys: std::collections::HashSet<_> = Collection::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), Collection::ALL.len());
    }
}
