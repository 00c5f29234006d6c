use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::dish::Dish;

/// Snapshot of a dish taken when an order is placed.
///
/// Later renames or deletions of the source dish do not affect it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderedDish {
    pub id: String,
    pub name: String,
}

impl OrderedDish {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<&Dish> for OrderedDish {
    fn from(dish: &Dish) -> Self {
        Self::new(dish.id.clone(), dish.name.clone())
    }
}

/// An informal order placed from the catalog. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub dishes: Vec<OrderedDish>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn dish_names(&self) -> Vec<&str> {
        self.dishes.iter().map(|d| d.name.as_str()).collect()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Order {} - {}",
            self.id,
            self.created_at.format("%Y-%m-%d %H:%M")
        )?;
        writeln!(f, "{}", "=".repeat(30))?;

        for dish in &self.dishes {
            writeln!(f, "  - {}", dish.name)?;
        }

        Ok(())
    }
}
