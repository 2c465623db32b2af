//! Data models for Foodset
//!
//! Defines the food record, its typed fields, and the bundled sample
//! dataset used when nothing has been saved yet.

pub mod coerce;
mod food;
mod sample;

pub use coerce::{parse_amount, parse_list, parse_optional_amount, parse_optional_text, FieldError};
pub use food::{Difficulty, FieldIssue, FoodFields, FoodRecord, PreparationMethod};
pub use sample::sample_records;
