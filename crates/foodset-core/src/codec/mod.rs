//! Serialization codec
//!
//! Converts the record collection to CSV and JSON text, and validates
//! JSON supplied for import.

pub mod csv;
pub mod json;

use std::fmt;
use std::str::FromStr;

pub use self::csv::{to_csv, to_csv_with, CsvQuoting, CSV_HEADERS};
pub use self::json::{parse_import, to_json, FormatError, ImportReport, ImportSummary};

use crate::models::FoodRecord;

/// A downloadable export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Conventional file name for a download
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "food-dataset.csv",
            ExportFormat::Json => "food-dataset.json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8;",
            ExportFormat::Json => "application/json",
        }
    }

    /// Render records in this format
    pub fn render(&self, records: &[FoodRecord]) -> Result<String, serde_json::Error> {
        match self {
            ExportFormat::Csv => Ok(to_csv(records)),
            ExportFormat::Json => to_json(records),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unknown export format: '{}' (use csv or json)", other)),
        }
    }
}
