use clap::{Args, Subcommand};

use dishbook_core::{KeyValueStore, Store};

use super::{resolve_dish, OutputFormat};

#[derive(Args)]
pub struct FavoriteCommand {
    #[command(subcommand)]
    pub command: FavoriteSubcommand,
}

#[derive(Subcommand)]
pub enum FavoriteSubcommand {
    /// Mark or unmark a dish as favorite
    Toggle {
        /// Dish ID or name
        identifier: String,
    },

    /// List favorite dishes
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl FavoriteCommand {
    pub fn run<B: KeyValueStore>(
        &self,
        store: &mut Store<B>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FavoriteSubcommand::Toggle { identifier } => {
                let dish = resolve_dish(store, identifier)
                    .ok_or_else(|| format!("Dish not found: {}", identifier))?;

                if store.toggle_favorite(&dish.id)? {
                    println!("Added to favorites: {}", dish.name);
                } else {
                    println!("Removed from favorites: {}", dish.name);
                }
                Ok(())
            }

            FavoriteSubcommand::List { format } => {
                let favorites = store.favorites();
                let dishes: Vec<_> = store
                    .dishes()
                    .into_iter()
                    .filter(|d| favorites.contains(&d.id))
                    .collect();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&dishes)?);
                    }
                    OutputFormat::Text => {
                        if dishes.is_empty() {
                            println!("No favorites yet");
                            return Ok(());
                        }
                        for dish in &dishes {
                            println!("{:<36}  {}", dish.id, dish.name);
                        }
                        // Favorites can outlive the dishes they point to.
                        let missing = favorites.len().saturating_sub(dishes.len());
                        if missing > 0 {
                            println!("\n{} favorite(s) refer to deleted dishes", missing);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
