//! Backup commands: export, import and clear.

use chrono::Local;
use clap::{Args, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

use dishbook_core::{Bundle, ImportMode, KeyValueStore, Store};

use super::confirm;
use crate::config::Config;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum ImportModeArg {
    /// Keep existing records, add new ones
    #[default]
    Merge,
    /// Overwrite each collection present in the file
    Replace,
}

impl From<ImportModeArg> for ImportMode {
    fn from(arg: ImportModeArg) -> Self {
        match arg {
            ImportModeArg::Merge => ImportMode::Merge,
            ImportModeArg::Replace => ImportMode::Replace,
        }
    }
}

#[derive(Args)]
pub struct DataCommand {
    #[command(subcommand)]
    pub command: DataSubcommand,
}

#[derive(Subcommand)]
pub enum DataSubcommand {
    /// Export everything to a JSON file
    Export {
        /// Output file, or "-" for stdout (default: dated file in export_dir)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Import a JSON export
    Import {
        /// File to import
        file: PathBuf,

        /// How to combine with existing data
        #[arg(long, short, value_enum, default_value = "merge")]
        mode: ImportModeArg,

        /// Skip confirmation prompt for replace imports
        #[arg(long, short)]
        force: bool,
    },

    /// Delete all data and restore the default categories
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl DataCommand {
    pub fn run<B: KeyValueStore>(
        &self,
        store: &mut Store<B>,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DataSubcommand::Export { output } => {
                let json = store.export_bundle().to_json_pretty()?;

                if output.as_deref() == Some(std::path::Path::new("-")) {
                    println!("{}", json);
                    return Ok(());
                }

                let path = output.clone().unwrap_or_else(|| {
                    config
                        .export_dir
                        .value
                        .join(Bundle::file_name(Local::now().date_naive()))
                });
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, json)
                    .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;

                tracing::info!(path = %path.display(), "Exported data");
                println!("Exported to {}", path.display());
                Ok(())
            }

            DataSubcommand::Import { file, mode, force } => {
                let text = fs::read_to_string(file)
                    .map_err(|e| format!("Failed to read '{}': {}", file.display(), e))?;
                let mode = ImportMode::from(*mode);

                if mode == ImportMode::Replace
                    && !force
                    && !confirm("Replace existing data with the file contents?")?
                {
                    println!("Import cancelled.");
                    return Ok(());
                }

                let summary = store.import_json(&text, mode)?;
                if summary.total() == 0 {
                    println!("Nothing imported");
                    return Ok(());
                }

                println!("Imported ({}):", mode);
                println!("  dishes:     {}", summary.dishes);
                println!("  categories: {}", summary.categories);
                println!("  orders:     {}", summary.orders);
                println!("  favorites:  {}", summary.favorites);
                Ok(())
            }

            DataSubcommand::Clear { force } => {
                if !force && !confirm("Delete all dishes, orders and favorites?")? {
                    println!("Clear cancelled.");
                    return Ok(());
                }

                store.clear_all()?;
                println!("All data cleared. Default categories restored.");
                Ok(())
            }
        }
    }
}
