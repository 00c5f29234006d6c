use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use commands::{
    CategoryCommand, ConfigCommand, DataCommand, DishCommand, FavoriteCommand, OrderCommand,
    StatsCommand,
};
use config::Config;
use dishbook_core::{FileStore, Store, StoreError};

#[derive(Parser)]
#[command(name = "dishbook")]
#[command(version)]
#[command(about = "A shared dish catalog: dishes, orders, favorites and stats", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage dishes
    Dish(DishCommand),

    /// Manage categories
    Category(CategoryCommand),

    /// Place orders and review order history
    Order(OrderCommand),

    /// Manage favorite dishes
    Favorite(FavoriteCommand),

    /// Export, import or clear all data
    Data(DataCommand),

    /// Show statistics
    Stats(StatsCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr, filtered by `DISHBOOK_LOG`, then `RUST_LOG`, then `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DISHBOOK_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for config commands
    let cli_config_path = cli.config.clone();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path)?,
        Some(command) => {
            let mut store = open_store(&config)?;
            execute_command(command, &mut store, &config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Opens the file-backed store and runs first-use seeding.
fn open_store(config: &Config) -> Result<Store<FileStore>, StoreError> {
    let mut store = Store::new(FileStore::new(config.data_dir.value.clone()));
    if let Some(categories) = &config.default_categories {
        store = store.with_default_categories(categories.clone());
    }

    if store.init()? {
        tracing::info!(
            data_dir = %config.data_dir.value.display(),
            "Initialized new data directory"
        );
    }

    Ok(store)
}

fn execute_command(
    command: Commands,
    store: &mut Store<FileStore>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Dish(cmd) => cmd.run(store),
        Commands::Category(cmd) => cmd.run(store),
        Commands::Order(cmd) => cmd.run(store),
        Commands::Favorite(cmd) => cmd.run(store),
        Commands::Data(cmd) => cmd.run(store, config),
        Commands::Stats(cmd) => cmd.run(store),
        Commands::Config(cmd) => cmd.run(config, config.config_file.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dish_add() {
        let cli = Cli::try_parse_from([
            "dishbook",
            "dish",
            "add",
            "Mapo Tofu",
            "--category",
            "Home Cooking",
            "--category",
            "Spicy",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Dish(_))));
    }

    #[test]
    fn test_dish_add_requires_category() {
        assert!(Cli::try_parse_from(["dishbook", "dish", "add", "Mapo Tofu"]).is_err());
    }

    #[test]
    fn test_open_store_seeds_configured_categories() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &config_path,
            format!(
                "data_dir: {}\ndefault_categories:\n  - Breakfast\n",
                temp_dir.path().join("data").display()
            ),
        )
        .unwrap();
        let config = Config::load(Some(config_path)).unwrap();

        let store = open_store(&config).unwrap();
        assert_eq!(store.categories(), vec!["Breakfast"]);
        assert!(store.backend().exists("categories"));
    }
}
