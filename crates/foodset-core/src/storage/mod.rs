//! Storage layer
//!
//! The dataset lives in a single key-value slot. `SlotStorage` is the seam:
//!
//! - **FileSlotStorage**: one JSON file per key in the data directory
//! - **MemorySlotStorage**: shared in-memory map, for tests and embedding
//!
//! Values are opaque strings here; the store decides what goes in them.

pub mod error;
pub mod file;
pub mod slot;

pub use error::{IoAction, StorageError, StorageResult};
pub use file::FileSlotStorage;
pub use slot::{MemorySlotStorage, SlotStats, SlotStorage};
