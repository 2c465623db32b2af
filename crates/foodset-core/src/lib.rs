//! Foodset Core Library
//!
//! This crate provides the core functionality for Foodset, a local dataset
//! of foods and recipes with nutritional fields.
//!
//! # Architecture
//!
//! - **FoodStore**: owns the collection, persists it after every change
//! - **SlotStorage**: where the collection is kept between sessions
//!
//! Views are derived from the collection by the query functions and never
//! stored.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = FoodStore::open()?;
//!
//! // Add a record
//! let fields = FoodFields::new("Apple", "Fruit", "1 medium", 95.0);
//! store.add(fields)?;
//!
//! // Query records
//! let view = ViewQuery::default().apply(store.list());
//! ```
//!
//! # Modules
//!
//! - `store`: Record store (main entry point)
//! - `models`: Food records, field coercion and sample data
//! - `codec`: CSV and JSON export, JSON import
//! - `query`: Category list, filter and sort
//! - `storage`: Slot persistence
//! - `config`: Application configuration

pub mod codec;
pub mod config;
pub mod events;
pub mod id;
pub mod models;
pub mod query;
pub mod storage;
pub mod store;

pub use codec::{ExportFormat, FormatError, ImportSummary};
pub use config::Config;
pub use events::{LogListener, StoreEvent, StoreListener};
pub use id::RecordId;
pub use models::{FoodFields, FoodRecord};
pub use query::{SortDirection, SortField, ViewQuery};
pub use storage::{FileSlotStorage, MemorySlotStorage, SlotStorage, StorageError};
pub use store::{DatasetOrigin, FoodStore, ImportMode, MergeSummary, StoreError};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
