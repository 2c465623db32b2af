//! Export and import command handlers

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use foodset_core::codec::{to_csv_with, CsvQuoting};
use foodset_core::{ExportFormat, FoodStore, ImportMode, ImportSummary};

use super::store_error;
use crate::editor::{import_from_editor, is_interactive};
use crate::output::{Output, OutputFormat};

/// Export the dataset to a file or stdout
pub fn export(
    store: &FoodStore,
    format: &str,
    path: Option<PathBuf>,
    strict_csv: bool,
    output: &Output,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow!(e))?;
    let text = render(store, format, strict_csv)?;

    match path {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(format.file_name())
            } else {
                path
            };
            fs::write(&path, &text)
                .with_context(|| format!("Failed to write export file: {:?}", path))?;
            output.success(&format!(
                "Exported {} food items to {}",
                store.len(),
                path.display()
            ));
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn render(store: &FoodStore, format: ExportFormat, strict_csv: bool) -> Result<String> {
    let text = match format {
        ExportFormat::Csv if strict_csv => to_csv_with(store.list(), CsvQuoting::Rfc4180),
        _ => format
            .render(store.list())
            .context("Failed to render export")?,
    };
    Ok(text)
}

/// Import a JSON array from a file, stdin, or the editor
pub fn import(
    store: &mut FoodStore,
    source: Option<&str>,
    merge: bool,
    output: &Output,
) -> Result<()> {
    let text = match source {
        Some(source) => read_source(source)?,
        None if is_interactive() => import_from_editor()?,
        None => read_stdin()?,
    };

    let mode = if merge {
        ImportMode::Merge
    } else {
        ImportMode::Replace
    };
    let summary = store
        .import_json(&text, mode)
        .map_err(|e| store_error(e, "import data"))?;

    report(&summary, output);
    Ok(())
}

/// Read import text from a path, or stdin for `-`
fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        return read_stdin();
    }

    let path = Path::new(source);
    fs::read_to_string(path).with_context(|| format!("Failed to read import file: {:?}", path))
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read import data from stdin")?;
    Ok(text)
}

fn report(summary: &ImportSummary, output: &Output) {
    if output.format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::json!({
                "status": "success",
                "accepted": summary.accepted,
                "rejected": summary.rejected,
                "duplicate_ids": summary.duplicate_ids,
            })
        );
        return;
    }

    output.success(&format!(
        "{} food items have been imported.",
        summary.accepted
    ));
    if summary.rejected > 0 {
        output.warn(&format!(
            "{} entries were skipped because they have no name",
            summary.rejected
        ));
    }
    if !summary.duplicate_ids.is_empty() {
        let ids: Vec<&str> = summary.duplicate_ids.iter().map(|id| id.as_str()).collect();
        output.warn(&format!("Some items share an id: {}", ids.join(", ")));
    }
}
