use clap::{Args, Subcommand};

use dishbook_core::{KeyValueStore, Store};

use super::{resolve_dish, OutputFormat};

#[derive(Args)]
pub struct OrderCommand {
    #[command(subcommand)]
    pub command: OrderSubcommand,
}

#[derive(Subcommand)]
pub enum OrderSubcommand {
    /// Place an order
    Place {
        /// Dish IDs or names
        #[arg(required = true)]
        dishes: Vec<String>,
    },

    /// Show order history, newest first
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Show at most this many orders
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// Delete an order from the history
    Delete {
        /// Order ID
        id: String,
    },
}

impl OrderCommand {
    pub fn run<B: KeyValueStore>(
        &self,
        store: &mut Store<B>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            OrderSubcommand::Place { dishes } => {
                let mut ids = Vec::with_capacity(dishes.len());
                for dish_ref in dishes {
                    let dish = resolve_dish(store, dish_ref)
                        .ok_or_else(|| format!("Dish not found: {}", dish_ref))?;
                    ids.push(dish.id);
                }

                let order = store.order_dishes(&ids)?;
                println!("Placed order:");
                println!();
                print!("{}", order);
                Ok(())
            }

            OrderSubcommand::List { format, limit } => {
                let mut orders = store.orders();
                if let Some(limit) = limit {
                    orders.truncate(*limit);
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&orders)?);
                    }
                    OutputFormat::Text => {
                        if orders.is_empty() {
                            println!("No orders yet");
                            return Ok(());
                        }
                        for order in &orders {
                            println!(
                                "{}  {:<36}  {}",
                                order.created_at.format("%Y-%m-%d %H:%M"),
                                order.id,
                                order.dish_names().join(", ")
                            );
                        }
                        println!("\nTotal: {} order(s)", orders.len());
                    }
                }
                Ok(())
            }

            OrderSubcommand::Delete { id } => {
                if !store.orders().iter().any(|o| &o.id == id) {
                    return Err(format!("Order not found: {}", id).into());
                }

                store.delete_order(id)?;
                println!("Deleted order: {}", id);
                Ok(())
            }
        }
    }
}
