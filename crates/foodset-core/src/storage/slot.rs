//! Key-value slot abstraction
//!
//! The store keeps its whole collection in one slot under a fixed key.
//! Anything that can read and write a string by key can back it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use super::error::{StorageError, StorageResult};

/// Information about a stored slot
#[derive(Debug, Clone, Default)]
pub struct SlotStats {
    /// Whether the slot holds a value
    pub exists: bool,
    /// Size of the stored value in bytes
    pub size: u64,
    /// When the value was last written, if known
    pub modified: Option<DateTime<Utc>>,
}

impl SlotStats {
    /// Format the size for display
    pub fn size_human(&self) -> String {
        format_bytes(self.size)
    }
}

/// Durable key-value storage for the dataset
pub trait SlotStorage {
    /// Read the value under `key`; `None` when nothing was ever written
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value under `key`
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Move an unreadable value out of the way so it is not overwritten
    ///
    /// Returns where the old value went, if it was kept anywhere.
    fn quarantine(&mut self, _key: &str) -> StorageResult<Option<PathBuf>> {
        Ok(None)
    }

    /// Statistics for the value under `key`
    fn stats(&self, key: &str) -> SlotStats;

    /// Human-readable location, for status output
    fn location(&self) -> String;
}

#[derive(Debug, Default)]
struct MemoryState {
    slots: HashMap<String, String>,
    read_only: bool,
    writes: usize,
}

/// In-memory slot storage
///
/// Clones share the same slots, so a test can keep a handle while the
/// store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    state: Rc<RefCell<MemoryState>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `value` stored under `key`
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage
            .state
            .borrow_mut()
            .slots
            .insert(key.to_string(), value.into());
        storage
    }

    /// Make every following write fail
    pub fn set_read_only(&self, read_only: bool) {
        self.state.borrow_mut().read_only = read_only;
    }

    /// Current value under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.state.borrow().slots.get(key).cloned()
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut state = self.state.borrow_mut();
        if state.read_only {
            return Err(StorageError::ReadOnly {
                key: key.to_string(),
            });
        }
        state.slots.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }

    fn stats(&self, key: &str) -> SlotStats {
        match self.state.borrow().slots.get(key) {
            Some(value) => SlotStats {
                exists: true,
                size: value.len() as u64,
                modified: None,
            },
            None => SlotStats::default(),
        }
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Format bytes as human-readable size
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_read_write() {
        let mut storage = MemorySlotStorage::new();
        assert!(storage.read("k").unwrap().is_none());

        storage.write("k", "[]").unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_memory_clones_share_state() {
        let handle = MemorySlotStorage::new();
        let mut owned = handle.clone();

        owned.write("k", "v").unwrap();
        assert_eq!(handle.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_read_only() {
        let mut storage = MemorySlotStorage::with_value("k", "old");
        storage.set_read_only(true);

        assert!(matches!(
            storage.write("k", "new"),
            Err(StorageError::ReadOnly { .. })
        ));
        assert_eq!(storage.get("k").as_deref(), Some("old"));
    }

    #[test]
    fn test_memory_stats() {
        let storage = MemorySlotStorage::with_value("k", "12345");
        let stats = storage.stats("k");
        assert!(stats.exists);
        assert_eq!(stats.size, 5);
        assert!(!storage.stats("other").exists);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 bytes");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_default_quarantine_keeps_nothing() {
        let mut storage = MemorySlotStorage::with_value("k", "garbage");
        assert!(storage.quarantine("k").unwrap().is_none());
    }
}
