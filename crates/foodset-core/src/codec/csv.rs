//! CSV export
//!
//! The column set is fixed. Text columns are wrapped in double quotes;
//! numeric columns are bare. Absent values, and zero amounts, render as
//! empty cells.

use crate::models::FoodRecord;

/// Header row, in column order
pub const CSV_HEADERS: [&str; 21] = [
    "Name",
    "Category",
    "Serving Size",
    "Calories",
    "Protein (g)",
    "Fat (g)",
    "Carbs (g)",
    "Fiber (g)",
    "Sugar (g)",
    "Sodium (mg)",
    "Potassium (mg)",
    "Calcium (mg)",
    "Iron (mg)",
    "Vitamin A (IU)",
    "Vitamin C (mg)",
    "Vitamin D (IU)",
    "Brand",
    "Ingredients",
    "Allergens",
    "Preparation",
    "Glycemic Index",
];

/// How text cells are quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvQuoting {
    /// Wrap in quotes, leave the content untouched. Embedded quotes and
    /// line breaks are not escaped.
    #[default]
    Verbatim,
    /// RFC 4180: embedded quotes are doubled
    Rfc4180,
}

/// Render records as CSV with verbatim quoting
pub fn to_csv(records: &[FoodRecord]) -> String {
    to_csv_with(records, CsvQuoting::Verbatim)
}

/// Render records as CSV with the given quoting
pub fn to_csv_with(records: &[FoodRecord], quoting: CsvQuoting) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    lines.extend(records.iter().map(|record| row(record, quoting)));
    lines.join("\n")
}

fn row(record: &FoodRecord, quoting: CsvQuoting) -> String {
    let f = &record.fields;
    let text_cell = |value: Option<&str>| quote(value.unwrap_or(""), quoting);

    [
        text_cell(Some(f.name.as_str())),
        text_cell(Some(f.category.as_str())),
        text_cell(Some(f.serving_size.as_str())),
        amount_cell(Some(f.calories)),
        amount_cell(Some(f.protein)),
        amount_cell(Some(f.fat)),
        amount_cell(Some(f.carbohydrates)),
        amount_cell(Some(f.fiber)),
        amount_cell(Some(f.sugar)),
        amount_cell(f.sodium),
        amount_cell(f.potassium),
        amount_cell(f.calcium),
        amount_cell(f.iron),
        amount_cell(f.vitamin_a),
        amount_cell(f.vitamin_c),
        amount_cell(f.vitamin_d),
        text_cell(f.brand.as_deref()),
        text_cell(f.ingredients.as_deref()),
        text_cell(f.allergens.as_deref()),
        text_cell(f.preparation_method.as_ref().map(|m| m.as_str())),
        amount_cell(f.glycemic_index),
    ]
    .join(",")
}

fn quote(value: &str, quoting: CsvQuoting) -> String {
    match quoting {
        CsvQuoting::Verbatim => format!("\"{}\"", value),
        CsvQuoting::Rfc4180 => format!("\"{}\"", value.replace('"', "\"\"")),
    }
}

fn amount_cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => v.to_string(),
        _ => String::new(),
    }
}
