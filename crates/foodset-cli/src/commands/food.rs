//! Food item command handlers

use anyhow::{anyhow, Result};

use foodset_core::query::{self, SortDirection, SortField, ViewQuery};
use foodset_core::{Config, FoodFields, FoodRecord, FoodStore};

use super::store_error;
use crate::editor::confirm;
use crate::fields::{self, FieldArgs};
use crate::output::Output;

/// Serving size given to items added without one
const DEFAULT_SERVING_SIZE: &str = "1 serving";

/// List items, filtered and sorted
pub fn list(
    store: &FoodStore,
    search: String,
    category: String,
    sort: &str,
    desc: bool,
    output: &Output,
) -> Result<()> {
    let field: SortField = sort.parse().map_err(|e: String| anyhow!(e))?;
    let view = ViewQuery {
        search,
        category,
        field,
        direction: if desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        },
    };

    output.print_records(&view.apply(store.list()))
}

/// Show a single item
pub fn show(store: &FoodStore, id: &str, output: &Output) -> Result<()> {
    let record = find(store, id)?;
    output.print_record(record)
}

/// Add a new item
pub fn add(
    store: &mut FoodStore,
    config: &Config,
    name: String,
    args: &FieldArgs,
    output: &Output,
) -> Result<()> {
    let default_category = config
        .categories
        .last()
        .map(String::as_str)
        .unwrap_or("Other");
    let mut fields = FoodFields::new(name.trim(), default_category, DEFAULT_SERVING_SIZE, 0.0);
    args.apply(&mut fields)?;

    for warning in fields::check(&fields, config)? {
        output.warn(&warning);
    }

    let record = store
        .add(fields)
        .map_err(|e| store_error(e, "add food item"))?;

    output.success(&format!("{} has been added to the dataset.", record.name()));
    output.print_record(&record)
}

/// Edit an existing item
pub fn edit(
    store: &mut FoodStore,
    config: &Config,
    id: &str,
    args: &FieldArgs,
    output: &Output,
) -> Result<()> {
    let mut record = find(store, id)?.clone();
    args.apply(&mut record.fields)?;

    for warning in fields::check(&record.fields, config)? {
        output.warn(&warning);
    }

    store
        .update(record.clone())
        .map_err(|e| store_error(e, "update food item"))?;

    output.success(&format!("{} has been updated in the dataset.", record.name()));
    output.print_record(&record)
}

/// Delete an item
pub fn delete(store: &mut FoodStore, id: &str, yes: bool, output: &Output) -> Result<()> {
    let record = find(store, id)?;
    let (id, name) = (record.id.clone(), record.name().to_string());

    if !yes && output.should_prompt() {
        println!("Delete food item: {} - {}", id, name);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store
        .remove(id.as_str())
        .map_err(|e| store_error(e, "delete food item"))?;

    output.success(&format!("{} has been removed from the dataset.", name));
    Ok(())
}

/// Remove every item
pub fn clear(store: &mut FoodStore, yes: bool, output: &Output) -> Result<()> {
    if store.is_empty() {
        output.message("The dataset is already empty.");
        return Ok(());
    }

    if !yes {
        if !output.should_prompt() {
            anyhow::bail!("Refusing to clear the dataset without --yes");
        }
        println!("This will remove all {} food items.", store.len());
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = store
        .clear()
        .map_err(|e| store_error(e, "clear dataset"))?;
    output.success(&format!(
        "All food items have been removed from the dataset ({} removed).",
        removed
    ));
    Ok(())
}

/// List categories present in the dataset with item counts
pub fn categories(store: &FoodStore, output: &Output) -> Result<()> {
    let records = store.list();
    let counts: Vec<(String, usize)> = query::categories(records)
        .into_iter()
        .map(|category| {
            let count = query::filter(records, "", &category).len();
            (category, count)
        })
        .collect();

    output.print_categories(&counts)
}

/// Find an item by full id or unique prefix
fn find<'a>(store: &'a FoodStore, id: &str) -> Result<&'a FoodRecord> {
    store
        .find(id)
        .ok_or_else(|| anyhow!("Food item not found: {}", id))
}
