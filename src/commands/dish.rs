use clap::{Args, Subcommand};

use dishbook_core::{DishPatch, KeyValueStore, NewDish, Store};

use super::{confirm, resolve_dish, truncate, OutputFormat};

#[derive(Args)]
pub struct DishCommand {
    #[command(subcommand)]
    pub command: DishSubcommand,
}

#[derive(Subcommand)]
pub enum DishSubcommand {
    /// Add a new dish
    Add {
        /// Name of the dish
        name: String,

        /// Category (can be repeated, at least one must exist)
        #[arg(long = "category", value_name = "CATEGORY", required = true)]
        categories: Vec<String>,

        /// Ingredients, free text
        #[arg(long)]
        ingredients: Option<String>,

        /// Cooking instructions
        #[arg(long)]
        instructions: Option<String>,
    },

    /// List dishes
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Only dishes in this category
        #[arg(long)]
        category: Option<String>,

        /// Search name and ingredients
        #[arg(long, short)]
        search: Option<String>,

        /// Only favorite dishes
        #[arg(long)]
        favorites: bool,
    },

    /// Show a dish's details
    Show {
        /// Dish ID or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update an existing dish
    Update {
        /// Dish ID or name
        identifier: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// Replace the categories (can be repeated)
        #[arg(long = "category", value_name = "CATEGORY")]
        categories: Vec<String>,

        /// New ingredients
        #[arg(long, conflicts_with = "clear_ingredients")]
        ingredients: Option<String>,

        /// Remove the ingredients
        #[arg(long)]
        clear_ingredients: bool,

        /// New instructions
        #[arg(long, conflicts_with = "clear_instructions")]
        instructions: Option<String>,

        /// Remove the instructions
        #[arg(long)]
        clear_instructions: bool,
    },

    /// Delete a dish
    Delete {
        /// Dish ID or name
        identifier: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl DishCommand {
    pub fn run<B: KeyValueStore>(
        &self,
        store: &mut Store<B>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DishSubcommand::Add {
                name,
                categories,
                ingredients,
                instructions,
            } => {
                let mut new_dish =
                    NewDish::new(name.trim()).with_categories(clean_categories(categories));
                if let Some(ingredients) = ingredients.as_deref().and_then(clean_text) {
                    new_dish = new_dish.with_ingredients(ingredients);
                }
                if let Some(instructions) = instructions.as_deref().and_then(clean_text) {
                    new_dish = new_dish.with_instructions(instructions);
                }

                let created = store.add_dish(new_dish)?;
                println!("Added dish:");
                println!("{}", created);
                Ok(())
            }

            DishSubcommand::List {
                format,
                category,
                search,
                favorites,
            } => {
                let favorite_ids = store.favorites();
                let dishes: Vec<_> = store
                    .dishes()
                    .into_iter()
                    .filter(|d| category.as_ref().map_or(true, |c| d.has_category(c)))
                    .filter(|d| search.as_ref().map_or(true, |q| d.matches(q)))
                    .filter(|d| !favorites || favorite_ids.contains(&d.id))
                    .collect();

                if dishes.is_empty() {
                    println!("No dishes found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&dishes)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<36}  {:<30}  CATEGORIES", "ID", "NAME");
                        println!("{}", "-".repeat(80));
                        for dish in &dishes {
                            let marker = if favorite_ids.contains(&dish.id) { "*" } else { "" };
                            let name = truncate(&format!("{}{}", dish.name, marker), 30);
                            println!(
                                "{:<36}  {:<30}  {}",
                                dish.id,
                                name,
                                dish.categories.join(", ")
                            );
                        }
                        println!("\nTotal: {} dish(es)", dishes.len());
                    }
                }
                Ok(())
            }

            DishSubcommand::Show { identifier, format } => {
                let dish = resolve_dish(store, identifier)
                    .ok_or_else(|| format!("Dish not found: {}", identifier))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&dish)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", dish);
                        if store.is_favorite(&dish.id) {
                            println!("Favorite: yes");
                        }
                    }
                }
                Ok(())
            }

            DishSubcommand::Update {
                identifier,
                name,
                categories,
                ingredients,
                clear_ingredients,
                instructions,
                clear_instructions,
            } => {
                let mut patch = DishPatch::new();
                if let Some(name) = name {
                    patch = patch.with_name(name.trim());
                }
                if !categories.is_empty() {
                    patch = patch.with_categories(clean_categories(categories));
                }
                // Blank text on the command line clears the field.
                match ingredients.as_deref().map(clean_text) {
                    Some(Some(text)) => patch = patch.with_ingredients(text),
                    Some(None) => patch = patch.without_ingredients(),
                    None if *clear_ingredients => patch = patch.without_ingredients(),
                    None => {}
                }
                match instructions.as_deref().map(clean_text) {
                    Some(Some(text)) => patch = patch.with_instructions(text),
                    Some(None) => patch = patch.without_instructions(),
                    None if *clear_instructions => patch = patch.without_instructions(),
                    None => {}
                }

                if patch.is_empty() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let dish = resolve_dish(store, identifier)
                    .ok_or_else(|| format!("Dish not found: {}", identifier))?;

                match store.update_dish(&dish.id, patch)? {
                    Some(updated) => {
                        println!("Updated dish:");
                        println!("{}", updated);
                        Ok(())
                    }
                    None => Err(format!("Dish not found: {}", identifier).into()),
                }
            }

            DishSubcommand::Delete { identifier, force } => {
                let dish = resolve_dish(store, identifier)
                    .ok_or_else(|| format!("Dish not found: {}", identifier))?;

                if !force && !confirm(&format!("Delete dish '{}'?", dish.name))? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                store.delete_dish(&dish.id)?;
                println!("Deleted dish: {}", dish.name);
                Ok(())
            }
        }
    }
}

/// Trims each category, dropping blanks and repeats.
fn clean_categories(categories: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(categories.len());
    for category in categories.iter().map(|c| c.trim()) {
        if !category.is_empty() && !cleaned.iter().any(|c| c == category) {
            cleaned.push(category.to_string());
        }
    }
    cleaned
}

fn clean_text(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dishbook_core::MemoryStore;

    fn test_store() -> Store<MemoryStore> {
        let mut store = Store::new(MemoryStore::new());
        store.init().unwrap();
        store
    }

    #[test]
    fn test_clean_categories() {
        let raw = vec![" Drinks".to_string(), "Drinks ".into(), "  ".into(), "Snacks".into()];
        assert_eq!(clean_categories(&raw), vec!["Drinks", "Snacks"]);
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  milk, tea "), Some("milk, tea".to_string()));
        assert_eq!(clean_text("   "), None);
    }

    #[test]
    fn test_add_tidies_command_line_input() {
        let mut store = test_store();
        let cmd = DishCommand {
            command: DishSubcommand::Add {
                name: " Tea ".into(),
                categories: vec!["Drinks".into(), " Drinks".into()],
                ingredients: Some("  ".into()),
                instructions: None,
            },
        };

        cmd.run(&mut store).unwrap();

        let dishes = store.dishes();
        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0].name, "Tea");
        assert_eq!(dishes[0].categories, vec!["Drinks"]);
        assert!(dishes[0].ingredients.is_none());
    }

    #[test]
    fn test_update_with_blank_text_clears_field() {
        let mut store = test_store();
        let dish = store
            .add_dish(
                NewDish::new("Tea")
                    .with_categories(vec!["Drinks".into()])
                    .with_ingredients("leaves"),
            )
            .unwrap();
        let cmd = DishCommand {
            command: DishSubcommand::Update {
                identifier: dish.id.clone(),
                name: Some("  Green Tea ".into()),
                categories: vec![],
                ingredients: Some(" ".into()),
                clear_ingredients: false,
                instructions: None,
                clear_instructions: false,
            },
        };

        cmd.run(&mut store).unwrap();

        let updated = store.get_dish_by_id(&dish.id).unwrap();
        assert_eq!(updated.name, "Green Tea");
        assert!(updated.ingredients.is_none());
    }
}
