//! JSON export and import
//!
//! Export is a pretty-printed array of every record. Import accepts a
//! top-level array and keeps the elements that are objects with a
//! non-blank string `name`; the rest are dropped and counted.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::id::{self, RecordId};
use crate::models::FoodRecord;

/// Why import text could not be read at all
///
/// The messages are the ones shown to users.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Nothing but whitespace was supplied
    #[error("Please enter JSON data")]
    Empty,

    /// The text is not JSON
    #[error("Invalid JSON format")]
    InvalidJson(#[source] serde_json::Error),

    /// The JSON value is not an array
    #[error("Invalid format: Data must be an array")]
    NotAnArray,
}

/// Counts describing an import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    /// Records accepted
    pub accepted: usize,
    /// Elements dropped for failing the structural check
    pub rejected: usize,
    /// Ids that appear on more than one accepted record
    pub duplicate_ids: Vec<RecordId>,
}

/// Result of parsing import text
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Accepted records, in input order, each with an id
    pub records: Vec<FoodRecord>,
    /// Elements dropped for failing the structural check
    pub rejected: usize,
    /// Ids that appear on more than one accepted record
    pub duplicate_ids: Vec<RecordId>,
}

impl ImportReport {
    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            accepted: self.records.len(),
            rejected: self.rejected,
            duplicate_ids: self.duplicate_ids.clone(),
        }
    }

    /// Split into the records and their summary
    pub fn into_parts(self) -> (Vec<FoodRecord>, ImportSummary) {
        let summary = self.summary();
        (self.records, summary)
    }
}

/// Render records as pretty-printed JSON with 2-space indentation
pub fn to_json(records: &[FoodRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Parse and normalize import text
///
/// Ids already present are kept as they are, including ids that collide
/// with each other; collisions are reported in `duplicate_ids`.
pub fn parse_import(text: &str) -> Result<ImportReport, FormatError> {
    if text.trim().is_empty() {
        return Err(FormatError::Empty);
    }

    let value: Value = serde_json::from_str(text).map_err(FormatError::InvalidJson)?;
    let Value::Array(items) = value else {
        return Err(FormatError::NotAnArray);
    };

    let mut report = ImportReport::default();
    for item in items {
        match accept(item) {
            Some(record) => report.records.push(record),
            None => report.rejected += 1,
        }
    }

    report.duplicate_ids = duplicate_ids(&report.records);
    if !report.duplicate_ids.is_empty() {
        warn!(
            count = report.duplicate_ids.len(),
            "Imported records share ids; keeping them as-is"
        );
    }

    debug!(
        accepted = report.records.len(),
        rejected = report.rejected,
        "Parsed import"
    );
    Ok(report)
}

/// The structural check for one array element
fn is_acceptable(item: &Value) -> bool {
    item.as_object()
        .and_then(|obj| obj.get("name"))
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty())
}

fn accept(item: Value) -> Option<FoodRecord> {
    if !is_acceptable(&item) {
        return None;
    }

    let mut record: FoodRecord = match serde_json::from_value(item) {
        Ok(record) => record,
        Err(e) => {
            warn!("Dropping import element that could not be read: {}", e);
            return None;
        }
    };

    if record.id.is_blank() {
        record.id = id::generate();
    }
    Some(record)
}

fn duplicate_ids(records: &[FoodRecord]) -> Vec<RecordId> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for record in records {
        if !seen.insert(&record.id) && reported.insert(&record.id) {
            duplicates.push(record.id.clone());
        }
    }
    duplicates
}
