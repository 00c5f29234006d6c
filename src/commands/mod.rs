mod category;
mod config_cmd;
mod data;
mod dish;
mod favorite;
mod order;
mod stats;

pub use category::CategoryCommand;
pub use config_cmd::ConfigCommand;
pub use data::DataCommand;
pub use dish::DishCommand;
pub use favorite::FavoriteCommand;
pub use order::OrderCommand;
pub use stats::StatsCommand;

use clap::ValueEnum;
use std::io::{self, Write};

use dishbook_core::{Dish, KeyValueStore, Store};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Finds a dish by exact id, falling back to a case-insensitive name match.
pub(crate) fn resolve_dish<B: KeyValueStore>(store: &Store<B>, identifier: &str) -> Option<Dish> {
    let dishes = store.dishes();
    let needle = identifier.trim();

    if let Some(dish) = dishes.iter().find(|d| d.id == needle) {
        return Some(dish.clone());
    }

    let lower = needle.to_lowercase();
    dishes.into_iter().find(|d| d.name.to_lowercase() == lower)
}

/// Asks a yes/no question on stdin. Anything but "y" is a no.
pub(crate) fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Shortens `text` to at most `max` characters for table output.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dishbook_core::{MemoryStore, NewDish};

    fn store_with(names: &[&str]) -> (Store<MemoryStore>, Vec<Dish>) {
        let mut store = Store::new(MemoryStore::new());
        store.init().unwrap();
        let dishes = names
            .iter()
            .map(|name| {
                store
                    .add_dish(NewDish::new(*name).with_categories(vec!["Soups".into()]))
                    .unwrap()
            })
            .collect();
        (store, dishes)
    }

    #[test]
    fn test_resolve_dish_by_id_and_name() {
        let (store, dishes) = store_with(&["Hot and Sour Soup", "Egg Drop Soup"]);

        assert_eq!(resolve_dish(&store, &dishes[1].id), Some(dishes[1].clone()));
        assert_eq!(
            resolve_dish(&store, "hot and sour soup"),
            Some(dishes[0].clone())
        );
        assert!(resolve_dish(&store, "Miso Soup").is_none());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long dish name", 10), "a very ...");
        assert_eq!(truncate("红烧肉红烧肉红烧肉", 5), "红烧...");
    }
}
