use clap::Args;

use dishbook_core::{KeyValueStore, Stats, Store};

use super::{truncate, OutputFormat};

#[derive(Args)]
pub struct StatsCommand {
    /// Number of most-ordered dishes to show
    #[arg(long, short, default_value_t = 5)]
    top: usize,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl StatsCommand {
    pub fn run<B: KeyValueStore>(
        &self,
        store: &Store<B>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let stats = Stats::compute(
            &store.dishes(),
            &store.categories(),
            &store.orders(),
            &store.favorites(),
        );

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            OutputFormat::Text => {
                println!("Statistics");
                println!("==========\n");
                println!("Dishes:         {}", stats.dish_count);
                println!("Categories:     {}", stats.category_count);
                println!("Favorites:      {}", stats.favorite_count);
                println!("Orders:         {}", stats.order_count);
                println!("Dishes ordered: {}", stats.dishes_ordered);

                let top = stats.top(self.top);
                if !top.is_empty() {
                    let widest = top.iter().map(|d| d.count).max().unwrap_or(1);
                    println!("\nMost ordered:");
                    for entry in top {
                        let bar = "#".repeat(entry.count * 20 / widest);
                        println!(
                            "  {:<24}  {:>3}  {}",
                            truncate(&entry.name, 24),
                            entry.count,
                            bar
                        );
                    }
                }

                if !stats.by_category.is_empty() {
                    println!("\nBy category:");
                    for entry in &stats.by_category {
                        let note = if entry.known { "" } else { " (deleted)" };
                        println!(
                            "  {:<24}  {:>3}{}",
                            truncate(&entry.category, 24),
                            entry.dishes,
                            note
                        );
                    }
                }
            }
        }
        Ok(())
    }
}
