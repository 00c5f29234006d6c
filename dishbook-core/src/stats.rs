//! Summary numbers for the statistics view.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Dish, Order};

/// How often a dish appears across all orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DishCount {
    pub dish_id: String,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub dishes: usize,
    /// False for names still used by dishes after the category was deleted.
    pub known: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub dish_count: usize,
    pub category_count: usize,
    pub order_count: usize,
    pub favorite_count: usize,
    /// Sum of dishes over every order.
    pub dishes_ordered: usize,
    /// Most ordered first; ties broken by name.
    pub most_ordered: Vec<DishCount>,
    pub by_category: Vec<CategoryCount>,
}

impl Stats {
    /// `orders` must be newest first, as the store returns them; a dish's display name
    /// comes from its most recent snapshot.
    pub fn compute(
        dishes: &[Dish],
        categories: &[String],
        orders: &[Order],
        favorites: &[String],
    ) -> Self {
        let mut counts: HashMap<&str, DishCount> = HashMap::new();
        for snapshot in orders.iter().flat_map(|o| &o.dishes) {
            counts
                .entry(snapshot.id.as_str())
                .or_insert_with(|| DishCount {
                    dish_id: snapshot.id.clone(),
                    name: snapshot.name.clone(),
                    count: 0,
                })
                .count += 1;
        }

        let mut most_ordered: Vec<DishCount> = counts.into_values().collect();
        most_ordered.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

        let mut by_category: Vec<CategoryCount> = categories
            .iter()
            .map(|category| CategoryCount {
                category: category.clone(),
                dishes: dishes.iter().filter(|d| d.has_category(category)).count(),
                known: true,
            })
            .collect();

        for dish in dishes {
            for category in &dish.categories {
                match by_category.iter_mut().find(|c| &c.category == category) {
                    Some(_) if categories.contains(category) => {}
                    Some(entry) => entry.dishes += 1,
                    None => by_category.push(CategoryCount {
                        category: category.clone(),
                        dishes: 1,
                        known: false,
                    }),
                }
            }
        }

        Self {
            dish_count: dishes.len(),
            category_count: categories.len(),
            order_count: orders.len(),
            favorite_count: favorites.len(),
            dishes_ordered: orders.iter().map(|o| o.dishes.len()).sum(),
            most_ordered,
            by_category,
        }
    }

    pub fn top(&self, n: usize) -> &[DishCount] {
        &self.most_ordered[..n.min(self.most_ordered.len())]
    }
}
