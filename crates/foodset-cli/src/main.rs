//! Foodset CLI
//!
//! Command-line interface for Foodset - food and recipe dataset management.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use foodset_core::{Config, FoodStore, LogListener};

mod commands;
mod editor;
mod fields;
mod logging;
mod output;

use fields::FieldArgs;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "foodset")]
#[command(about = "Foodset - Build, edit and export a food and recipe dataset")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List food items
    #[command(alias = "ls")]
    List {
        /// Only items whose name contains this text
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only items in this category
        #[arg(short, long, default_value = "All")]
        category: String,
        /// Field to sort by (e.g. name, calories, servingSize)
        #[arg(long, default_value = "name")]
        sort: String,
        /// Sort in descending order
        #[arg(long)]
        desc: bool,
    },
    /// Show a food item
    Show {
        /// Item ID (full ID or unique prefix)
        id: String,
    },
    /// Add a food item
    #[command(alias = "create")]
    Add {
        /// Name of the item
        name: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Edit a food item
    Edit {
        /// Item ID (full ID or unique prefix)
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a food item
    #[command(alias = "rm")]
    Delete {
        /// Item ID (full ID or unique prefix)
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove every food item
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List the categories present in the dataset
    Categories,
    /// Export the dataset as CSV or JSON
    Export {
        /// Export format (csv or json)
        #[arg(short, long, default_value = "csv")]
        format: String,
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Escape embedded quotes in CSV cells
        #[arg(long)]
        strict_csv: bool,
    },
    /// Import a JSON array of food items
    Import {
        /// File to read, or - for stdin (opens $EDITOR when omitted)
        path: Option<String>,
        /// Add to the dataset instead of replacing it
        #[arg(short, long)]
        merge: bool,
    },
    /// Show status (record count, storage)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, categories)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(&config, cli.verbose);

    let mut store = FoodStore::open_with_config(&config);
    store.subscribe(LogListener);

    if let Some(reason) = store.load_diagnostic() {
        output.warn(&format!(
            "Saved data could not be loaded ({}); starting from sample data",
            reason
        ));
    }

    match cli.command {
        Commands::List {
            search,
            category,
            sort,
            desc,
        } => commands::food::list(&store, search, category, &sort, desc, &output),
        Commands::Show { id } => commands::food::show(&store, &id, &output),
        Commands::Add { name, fields } => {
            commands::food::add(&mut store, &config, name, &fields, &output)
        }
        Commands::Edit { id, fields } => {
            commands::food::edit(&mut store, &config, &id, &fields, &output)
        }
        Commands::Delete { id, yes } => commands::food::delete(&mut store, &id, yes, &output),
        Commands::Clear { yes } => commands::food::clear(&mut store, yes, &output),
        Commands::Categories => commands::food::categories(&store, &output),
        Commands::Export {
            format,
            output: path,
            strict_csv,
        } => commands::transfer::export(&store, &format, path, strict_csv, &output),
        Commands::Import { path, merge } => {
            commands::transfer::import(&mut store, path.as_deref(), merge, &output)
        }
        Commands::Status => commands::status::show(&store, &config, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
