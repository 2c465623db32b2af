//! Status command handler

use anyhow::Result;

use foodset_core::query;
use foodset_core::{Config, DatasetOrigin, FoodStore};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &FoodStore, config: &Config, output: &Output) -> Result<()> {
    let stats = store.storage_stats();
    let categories = query::categories(store.list()).len() - 1;
    let modified = stats
        .modified
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string());

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "version": foodset_core::version(),
                    "origin": origin_label(store.origin()),
                    "diagnostic": store.load_diagnostic(),
                    "storage": {
                        "location": store.storage_location(),
                        "path": config.dataset_path(),
                        "exists": stats.exists,
                        "size": stats.size,
                        "modified": stats.modified.map(|t| t.to_rfc3339()),
                    },
                    "counts": {
                        "items": store.len(),
                        "categories": categories
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.len());
        }
        OutputFormat::Human => {
            println!("Foodset Status");
            println!("==============");
            println!();
            println!("Dataset:");
            println!("  Source: {}", origin_label(store.origin()));
            if let DatasetOrigin::Recovered { reason, backup } = store.origin() {
                println!("  Problem: {}", reason);
                if let Some(backup) = backup {
                    println!("  Backup:  {}", backup.display());
                }
            }
            println!();
            println!("Storage:");
            println!("  Location: {}", store.storage_location());
            if stats.exists {
                println!("  Size:     {}", stats.size_human());
                println!(
                    "  Saved:    {}",
                    modified.as_deref().unwrap_or("(unknown)")
                );
            } else {
                println!("  Size:     (not saved yet)");
            }
            println!();
            println!("Contents:");
            println!("  Food items: {}", store.len());
            println!("  Categories: {}", categories);
        }
    }

    Ok(())
}

fn origin_label(origin: &DatasetOrigin) -> &'static str {
    match origin {
        DatasetOrigin::Persisted => "saved data",
        DatasetOrigin::FirstRun => "sample data (nothing saved yet)",
        DatasetOrigin::Recovered { .. } => "sample data (saved data unreadable)",
    }
}
