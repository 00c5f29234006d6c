use clap::{Args, Subcommand};

use dishbook_core::{KeyValueStore, Store};

use super::{confirm, OutputFormat};

#[derive(Args)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand)]
pub enum CategorySubcommand {
    /// Add a category
    Add {
        /// Category name (case-sensitive)
        name: String,
    },

    /// List categories
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a category (dishes keep the name)
    Delete {
        /// Category name
        name: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl CategoryCommand {
    pub fn run<B: KeyValueStore>(
        &self,
        store: &mut Store<B>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            CategorySubcommand::Add { name } => {
                store.add_category(name)?;
                println!("Added category: {}", name.trim());
                Ok(())
            }

            CategorySubcommand::List { format } => {
                let categories = store.categories();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&categories)?);
                    }
                    OutputFormat::Text => {
                        if categories.is_empty() {
                            println!("No categories");
                            return Ok(());
                        }
                        let dishes = store.dishes();
                        for category in &categories {
                            let count = dishes.iter().filter(|d| d.has_category(category)).count();
                            println!("{:<30}  {} dish(es)", category, count);
                        }
                    }
                }
                Ok(())
            }

            CategorySubcommand::Delete { name, force } => {
                if !store.categories().contains(name) {
                    return Err(format!("Category not found: {}", name).into());
                }

                let in_use = store.dishes().iter().filter(|d| d.has_category(name)).count();
                if !force && in_use > 0 {
                    let prompt = format!(
                        "{} dish(es) still list '{}'. Delete it anyway?",
                        in_use, name
                    );
                    if !confirm(&prompt)? {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                store.delete_category(name)?;
                println!("Deleted category: {}", name);
                Ok(())
            }
        }
    }
}
