use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dish in the shared catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Dish {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Case-insensitive match against the name and ingredients text.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self
                .ingredients
                .as_deref()
                .is_some_and(|i| i.to_lowercase().contains(&query))
    }
}

impl fmt::Display for Dish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;
        writeln!(f, "ID: {}", self.id)?;

        if !self.categories.is_empty() {
            writeln!(f, "Categories: {}", self.categories.join(", "))?;
        }

        if let Some(ingredients) = &self.ingredients {
            writeln!(f, "\nIngredients:\n{}", ingredients)?;
        }

        if let Some(instructions) = &self.instructions {
            writeln!(f, "\nInstructions:\n{}", instructions)?;
        }

        writeln!(
            f,
            "\nAdded: {}",
            self.created_at.format("%Y-%m-%d %H:%M")
        )?;

        Ok(())
    }
}

/// Payload for creating a dish. The store assigns the id and timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewDish {
    pub name: String,
    pub categories: Vec<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
}

impl NewDish {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = Some(ingredients.into());
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Builds the stored record. Fields are kept exactly as supplied.
    pub(crate) fn into_dish(self, id: String, created_at: DateTime<Utc>) -> Dish {
        Dish {
            id,
            name: self.name,
            categories: self.categories,
            ingredients: self.ingredients,
            instructions: self.instructions,
            created_at,
        }
    }
}

/// A partial update to a dish. Fields left as `None` are preserved.
///
/// The optional text fields are doubly wrapped: `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DishPatch {
    pub name: Option<String>,
    pub categories: Option<Vec<String>>,
    pub ingredients: Option<Option<String>>,
    pub instructions: Option<Option<String>>,
}

impl DishPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn with_ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = Some(Some(ingredients.into()));
        self
    }

    pub fn without_ingredients(mut self) -> Self {
        self.ingredients = Some(None);
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(Some(instructions.into()));
        self
    }

    pub fn without_instructions(mut self) -> Self {
        self.instructions = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.categories.is_none()
            && self.ingredients.is_none()
            && self.instructions.is_none()
    }

    /// Shallow-merges the supplied fields over `dish`. `id` and `created_at` never change.
    pub fn apply(self, dish: &mut Dish) {
        if let Some(name) = self.name {
            dish.name = name;
        }
        if let Some(categories) = self.categories {
            dish.categories = categories;
        }
        if let Some(ingredients) = self.ingredients {
            dish.ingredients = ingredients;
        }
        if let Some(instructions) = self.instructions {
            dish.instructions = instructions;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dish() -> Dish {
        NewDish::new("Mapo Tofu")
            .with_categories(vec!["Home Cooking".into(), "Spicy".into()])
            .with_ingredients("tofu, minced pork, doubanjiang")
            .with_instructions("Fry the paste, add tofu, simmer.")
            .into_dish("d1".into(), Utc::now())
    }

    #[test]
    fn test_new_dish_into_dish() {
        let dish = NewDish::new("Congee")
            .with_categories(vec!["Soups".into(), "Breakfast".into()])
            .into_dish("abc".into(), Utc::now());

        assert_eq!(dish.id, "abc");
        assert_eq!(dish.name, "Congee");
        assert_eq!(dish.categories, vec!["Soups", "Breakfast"]);
        assert!(dish.ingredients.is_none());
        assert!(dish.instructions.is_none());
    }

    #[test]
    fn test_into_dish_keeps_fields_verbatim() {
        let dish = NewDish::new(" Tea ")
            .with_categories(vec!["Drinks".into(), "Drinks".into()])
            .with_ingredients("  ")
            .into_dish("t".into(), Utc::now());

        assert_eq!(dish.name, " Tea ");
        assert_eq!(dish.categories, vec!["Drinks", "Drinks"]);
        assert_eq!(dish.ingredients.as_deref(), Some("  "));
    }

    #[test]
    fn test_patch_keeps_fields_verbatim() {
        let mut dish = sample_dish();
        DishPatch::new()
            .with_name("  Mapo Tofu  ")
            .with_ingredients("")
            .apply(&mut dish);

        assert_eq!(dish.name, "  Mapo Tofu  ");
        assert_eq!(dish.ingredients.as_deref(), Some(""));
    }

    #[test]
    fn test_patch_preserves_unset_fields() {
        let mut dish = sample_dish();
        let original = dish.clone();

        DishPatch::new().with_name("Mapo Doufu").apply(&mut dish);

        assert_eq!(dish.name, "Mapo Doufu");
        assert_eq!(dish.id, original.id);
        assert_eq!(dish.categories, original.categories);
        assert_eq!(dish.ingredients, original.ingredients);
        assert_eq!(dish.instructions, original.instructions);
        assert_eq!(dish.created_at, original.created_at);
    }

    #[test]
    fn test_patch_clears_optional_text() {
        let mut dish = sample_dish();
        DishPatch::new().without_instructions().apply(&mut dish);

        assert!(dish.instructions.is_none());
        assert!(dish.ingredients.is_some());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(DishPatch::new().is_empty());
        assert!(!DishPatch::new().without_ingredients().is_empty());
    }

    #[test]
    fn test_matches_name_and_ingredients() {
        let dish = sample_dish();
        assert!(dish.matches("mapo"));
        assert!(dish.matches("PORK"));
        assert!(!dish.matches("noodle"));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let dish = sample_dish();
        let json = serde_json::to_value(&dish).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let json = r#"{"id":"1700000000000","name":"Dumplings","createdAt":"2024-02-10T12:00:00.000Z"}"#;
        let dish: Dish = serde_json::from_str(json).unwrap();

        assert_eq!(dish.id, "1700000000000");
        assert!(dish.categories.is_empty());
        assert!(dish.ingredients.is_none());
    }

    #[test]
    fn test_dish_display() {
        let output = format!("{}", sample_dish());
        assert!(output.contains("Mapo Tofu"));
        assert!(output.contains("Categories: Home Cooking, Spicy"));
        assert!(output.contains("doubanjiang"));
    }
}
