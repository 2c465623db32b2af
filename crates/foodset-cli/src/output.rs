//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::Result;
use serde::Serialize;

use foodset_core::FoodRecord;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single food item
    pub fn print_record(&self, record: &FoodRecord) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                for (label, value) in record_lines(record) {
                    println!("{:<17}{}", format!("{}:", label), value);
                }
            }
            OutputFormat::Json => print_json(record)?,
            OutputFormat::Quiet => println!("{}", record.id),
        }
        Ok(())
    }

    /// Print a list of food items
    pub fn print_records(&self, records: &[&FoodRecord]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if records.is_empty() {
                    println!("No food items found.");
                    return Ok(());
                }
                for record in records {
                    println!(
                        "{:<10} | {:<30} | {:<15} | {} kcal",
                        truncate(record.id.as_str(), 10),
                        truncate(record.name(), 30),
                        truncate(record.category(), 15),
                        record.fields.calories
                    );
                }
                println!("\n{} food item(s)", records.len());
            }
            OutputFormat::Json => print_json(&records)?,
            OutputFormat::Quiet => {
                for record in records {
                    println!("{}", record.id);
                }
            }
        }
        Ok(())
    }

    /// Print a list of categories with usage counts
    pub fn print_categories(&self, categories: &[(String, usize)]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                for (name, count) in categories {
                    println!("{} ({})", name, count);
                }
            }
            OutputFormat::Json => {
                let json_categories: Vec<_> = categories
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&json_categories)?;
            }
            OutputFormat::Quiet => {
                for (name, _) in categories {
                    println!("{}", name);
                }
            }
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning to stderr
    pub fn warn(&self, message: &str) {
        if !self.is_quiet() {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Labelled lines for the human view of a record, skipping absent fields
fn record_lines(record: &FoodRecord) -> Vec<(&'static str, String)> {
    let f = &record.fields;
    let mut lines = vec![
        ("ID", record.id.to_string()),
        ("Name", f.name.clone()),
        ("Category", f.category.clone()),
        ("Serving Size", f.serving_size.clone()),
        ("Calories", f.calories.to_string()),
        ("Protein (g)", f.protein.to_string()),
        ("Fat (g)", f.fat.to_string()),
        ("Carbs (g)", f.carbohydrates.to_string()),
        ("Fiber (g)", f.fiber.to_string()),
        ("Sugar (g)", f.sugar.to_string()),
    ];

    let amounts = [
        ("Sodium (mg)", f.sodium),
        ("Potassium (mg)", f.potassium),
        ("Calcium (mg)", f.calcium),
        ("Iron (mg)", f.iron),
        ("Vitamin A (IU)", f.vitamin_a),
        ("Vitamin C (mg)", f.vitamin_c),
        ("Vitamin D (IU)", f.vitamin_d),
        ("Glycemic Index", f.glycemic_index),
        ("Servings", f.servings),
        ("Nutrition Score", f.nutrition_score),
    ];
    lines.extend(
        amounts
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| (label, v.to_string()))),
    );

    let texts = [
        ("Brand", f.brand.as_deref()),
        ("Ingredients", f.ingredients.as_deref()),
        ("Allergens", f.allergens.as_deref()),
        ("Preparation", f.preparation_method.as_ref().map(|m| m.as_str())),
        ("Difficulty", f.difficulty.as_ref().map(|d| d.as_str())),
        ("Cuisine", f.cuisine_type.as_deref()),
        ("Cooking Time", f.cooking_time.as_deref()),
        ("Prep Time", f.prep_time.as_deref()),
        ("Cook Time", f.cook_time.as_deref()),
        ("Total Time", f.total_time.as_deref()),
        ("Image", f.image_url.as_deref()),
        ("Tips", f.tips.as_deref()),
    ];
    lines.extend(
        texts
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| (label, v.to_string()))),
    );

    let lists = [
        ("Dietary Info", &f.dietary_info),
        ("Equipment", &f.equipment),
    ];
    for (label, items) in lists {
        if let Some(items) = items.as_ref().filter(|items| !items.is_empty()) {
            lines.push((label, items.join(", ")));
        }
    }
    if let Some(steps) = f.instructions.as_ref().filter(|s| !s.is_empty()) {
        for (i, step) in steps.iter().enumerate() {
            let label = if i == 0 { "Instructions" } else { "" };
            lines.push((label, format!("{}. {}", i + 1, step)));
        }
    }

    lines
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
