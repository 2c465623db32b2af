//! Record store
//!
//! `FoodStore` owns the collection. It is created by the application's
//! composition root and handed to whatever needs it by reference; there is
//! no global instance.
//!
//! ## Persistence
//!
//! After every successful mutation the whole collection is written as a
//! JSON array to the slot under `DATASET_KEY`, then listeners are told. A failed write is returned
//! to the caller, but the in-memory change stays: the collection in memory
//! is authoritative for the session.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = FoodStore::open()?;
//!
//! let apple = store.add(FoodFields::new("Apple", "Fruit", "1 medium", 95.0))?;
//! store.remove(&apple.id)?;
//!
//! let records = store.list();
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, warn};

use crate::codec::{self, FormatError, ImportSummary};
use crate::config::{Config, DATASET_KEY};
use crate::events::{StoreEvent, StoreListener};
use crate::id::{self, RecordId};
use crate::models::{sample_records, FoodFields, FoodRecord};
use crate::storage::{FileSlotStorage, SlotStats, SlotStorage, StorageError};

/// Errors reported by store operations
///
/// None of them are fatal; the store stays usable after each.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record has the given id
    #[error("No food item with id '{id}'")]
    NotFound { id: RecordId },

    /// Import text was rejected as a whole
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The change was applied in memory but could not be saved
    #[error("Change applied but not saved: {0}")]
    Persistence(#[from] StorageError),
}

impl StoreError {
    /// True for errors that leave the in-memory collection changed
    pub fn is_unsaved_change(&self) -> bool {
        matches!(self, StoreError::Persistence(_))
    }

    /// What the user can do about this error, if anything
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StoreError::Persistence(e) => e.recovery_suggestion(),
            StoreError::NotFound { .. } | StoreError::Format(_) => None,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Where the collection came from when the store was opened
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetOrigin {
    /// Loaded from the persisted slot
    Persisted,
    /// Nothing was saved yet; started from the sample dataset
    FirstRun,
    /// Saved data could not be used; started from the sample dataset
    Recovered {
        reason: String,
        backup: Option<PathBuf>,
    },
}

/// How imported records join the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Substitute the whole collection
    #[default]
    Replace,
    /// Append, giving colliding ids fresh values
    Merge,
}

/// Counts from `merge_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeSummary {
    pub added: usize,
    pub reassigned: usize,
}

/// The food record store
pub struct FoodStore {
    records: Vec<FoodRecord>,
    storage: Box<dyn SlotStorage>,
    listeners: Vec<Box<dyn StoreListener>>,
    origin: DatasetOrigin,
}

impl FoodStore {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::open_with_config(&config))
    }

    /// Open the store backed by files in the configured data directory
    pub fn open_with_config(config: &Config) -> Self {
        Self::load(Box::new(FileSlotStorage::from_config(config)))
    }

    /// Load the collection from `storage`
    ///
    /// Falls back to the sample dataset when nothing is stored or the
    /// stored value cannot be read or parsed. Unusable data is moved aside
    /// first so the next save cannot overwrite it. The reason is kept in
    /// `origin()`.
    pub fn load(mut storage: Box<dyn SlotStorage>) -> Self {
        let (records, origin) = match storage.read(DATASET_KEY) {
            Ok(None) => {
                debug!("No saved dataset, starting from sample data");
                (sample_records(), DatasetOrigin::FirstRun)
            }
            Ok(Some(text)) => match serde_json::from_str::<Vec<FoodRecord>>(&text) {
                Ok(records) => {
                    debug!(count = records.len(), "Loaded saved dataset");
                    (records, DatasetOrigin::Persisted)
                }
                Err(e) => {
                    warn!("Error parsing saved food data: {}", e);
                    let reason = format!("saved data is not a valid dataset: {}", e);
                    (sample_records(), recover(storage.as_mut(), reason))
                }
            },
            Err(e) => {
                warn!("Error reading saved food data: {}", e);
                (sample_records(), recover(storage.as_mut(), e.to_string()))
            }
        };

        Self {
            records,
            storage,
            listeners: Vec::new(),
            origin,
        }
    }

    /// Create a store over `storage` with a given collection, without loading
    pub fn with_records(storage: Box<dyn SlotStorage>, records: Vec<FoodRecord>) -> Self {
        Self {
            records,
            storage,
            listeners: Vec::new(),
            origin: DatasetOrigin::Persisted,
        }
    }

    /// Register a listener for store events
    pub fn subscribe(&mut self, listener: impl StoreListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Where the collection came from at open
    pub fn origin(&self) -> &DatasetOrigin {
        &self.origin
    }

    /// Why the sample dataset was used at open, if saved data was unusable
    pub fn load_diagnostic(&self) -> Option<&str> {
        match &self.origin {
            DatasetOrigin::Recovered { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Statistics for the persisted slot
    pub fn storage_stats(&self) -> SlotStats {
        self.storage.stats(DATASET_KEY)
    }

    /// Human-readable storage location
    pub fn storage_location(&self) -> String {
        self.storage.location()
    }

    // ==================== Queries ====================

    /// All records in insertion order
    pub fn list(&self) -> &[FoodRecord] {
        &self.records
    }

    /// Find a record by id
    pub fn get(&self, id: &str) -> Option<&FoodRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Find a record by id, or by a unique id prefix
    pub fn find(&self, id_or_prefix: &str) -> Option<&FoodRecord> {
        if let Some(record) = self.get(id_or_prefix) {
            return Some(record);
        }
        if id_or_prefix.is_empty() {
            return None;
        }

        let mut matches = self
            .records
            .iter()
            .filter(|r| r.id.as_str().starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(record), None) => Some(record),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ==================== Mutations ====================

    /// Add a new record with a fresh id
    ///
    /// On `Persistence` errors the record is still in `list()`.
    pub fn add(&mut self, fields: FoodFields) -> StoreResult<FoodRecord> {
        let record = FoodRecord::new(self.fresh_id(), fields);
        self.records.push(record.clone());

        self.commit(StoreEvent::Added {
            id: record.id.clone(),
            name: record.fields.name.clone(),
        })?;
        Ok(record)
    }

    /// Replace the record with the same id, keeping its position
    ///
    /// Every record sharing the id is replaced.
    pub fn update(&mut self, record: FoodRecord) -> StoreResult<()> {
        let positions: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.id == record.id)
            .map(|(i, _)| i)
            .collect();

        if positions.is_empty() {
            return Err(StoreError::NotFound { id: record.id });
        }

        let event = StoreEvent::Updated {
            id: record.id.clone(),
            name: record.fields.name.clone(),
        };
        for i in positions {
            self.records[i] = record.clone();
        }

        self.commit(event)
    }

    /// Remove the record with `id`, returning it
    ///
    /// Every record sharing the id is removed; the first is returned.
    pub fn remove(&mut self, id: &str) -> StoreResult<FoodRecord> {
        let first = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound {
                id: RecordId::new(id),
            })?;

        let removed = self.records.remove(first);
        self.records.retain(|r| r.id != id);

        self.commit(StoreEvent::Removed {
            id: removed.id.clone(),
            name: removed.fields.name.clone(),
        })?;
        Ok(removed)
    }

    /// Remove every record, returning how many there were
    pub fn clear(&mut self) -> StoreResult<usize> {
        let removed = self.records.len();
        self.records.clear();

        self.commit(StoreEvent::Cleared { removed })?;
        Ok(removed)
    }

    /// Substitute the whole collection
    pub fn replace_all(&mut self, records: Vec<FoodRecord>) -> StoreResult<()> {
        let count = records.len();
        self.records = records;

        self.commit(StoreEvent::Replaced { count })
    }

    /// Append records, giving any id already in use (or blank) a fresh one
    pub fn merge_all(&mut self, records: Vec<FoodRecord>) -> StoreResult<MergeSummary> {
        let mut taken: HashSet<RecordId> = self.records.iter().map(|r| r.id.clone()).collect();
        let mut summary = MergeSummary::default();

        for mut record in records {
            if record.id.is_blank() || taken.contains(&record.id) {
                record.id = fresh_id_excluding(&taken);
                summary.reassigned += 1;
            }
            taken.insert(record.id.clone());
            self.records.push(record);
            summary.added += 1;
        }

        self.commit(StoreEvent::Merged {
            added: summary.added,
            reassigned: summary.reassigned,
        })?;
        Ok(summary)
    }

    /// Parse import text and apply it
    ///
    /// Fails with `Format` before touching the collection if the text is
    /// unusable. Individual bad elements are dropped and counted instead.
    pub fn import_json(&mut self, text: &str, mode: ImportMode) -> StoreResult<ImportSummary> {
        let (records, summary) = codec::parse_import(text)?.into_parts();

        match mode {
            ImportMode::Replace => self.replace_all(records)?,
            ImportMode::Merge => {
                self.merge_all(records)?;
            }
        }
        Ok(summary)
    }

    // ==================== Internals ====================

    fn fresh_id(&self) -> RecordId {
        loop {
            let id = id::generate();
            if self.get(id.as_str()).is_none() {
                return id;
            }
        }
    }

    /// Persist, then tell listeners about `event`
    ///
    /// Listeners hear about the change even when the write fails, since the
    /// in-memory collection has changed either way.
    fn commit(&mut self, event: StoreEvent) -> StoreResult<()> {
        let saved = self.persist();
        self.notify(&event);
        saved
    }

    fn notify(&self, event: &StoreEvent) {
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }

    /// Write the whole collection to the slot
    fn persist(&mut self) -> StoreResult<()> {
        let text = serde_json::to_string(&self.records).map_err(StorageError::from)?;
        self.storage.write(DATASET_KEY, &text).map_err(|e| {
            warn!("Failed to save dataset: {}", e);
            StoreError::Persistence(e)
        })?;
        debug!(count = self.records.len(), "Saved dataset");
        Ok(())
    }
}

/// Move unusable saved data aside and describe what happened
fn recover(storage: &mut dyn SlotStorage, reason: String) -> DatasetOrigin {
    let backup = match storage.quarantine(DATASET_KEY) {
        Ok(backup) => backup,
        Err(e) => {
            warn!("Could not move unreadable dataset aside: {}", e);
            None
        }
    };
    DatasetOrigin::Recovered { reason, backup }
}

fn fresh_id_excluding(taken: &HashSet<RecordId>) -> RecordId {
    loop {
        let id = id::generate();
        if !taken.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlotStorage;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn memory_store() -> (FoodStore, MemorySlotStorage) {
        let storage = MemorySlotStorage::with_value(DATASET_KEY, "[]");
        let store = FoodStore::load(Box::new(storage.clone()));
        (store, storage)
    }

    fn saved_records(storage: &MemorySlotStorage) -> Vec<FoodRecord> {
        serde_json::from_str(&storage.get(DATASET_KEY).unwrap()).unwrap()
    }

    fn apple() -> FoodFields {
        FoodFields::new("Apple", "Fruit", "1 medium (182g)", 95.0)
    }

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            log_file: None,
            categories: Vec::new(),
        }
    }

    #[test]
    fn test_first_run_uses_sample_data() {
        let storage = MemorySlotStorage::new();
        let store = FoodStore::load(Box::new(storage.clone()));

        assert_eq!(store.origin(), &DatasetOrigin::FirstRun);
        assert!(store.load_diagnostic().is_none());
        assert_eq!(store.list(), sample_records().as_slice());
        // Nothing is written until the first mutation
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_unparsable_data_falls_back_to_sample() {
        let storage = MemorySlotStorage::with_value(DATASET_KEY, "{not json");
        let store = FoodStore::load(Box::new(storage));

        assert!(matches!(store.origin(), DatasetOrigin::Recovered { .. }));
        assert!(store.load_diagnostic().is_some());
        assert_eq!(store.len(), sample_records().len());
    }

    #[test]
    fn test_wrong_shape_falls_back_to_sample() {
        let storage = MemorySlotStorage::with_value(DATASET_KEY, "{\"name\":\"Apple\"}");
        let store = FoodStore::load(Box::new(storage));

        assert!(matches!(store.origin(), DatasetOrigin::Recovered { .. }));
    }

    #[test]
    fn test_loads_persisted_data() {
        let storage = MemorySlotStorage::with_value(
            DATASET_KEY,
            r#"[{"id":"a","name":"Rice","category":"Grain","servingSize":"1 cup","calories":206}]"#,
        );
        let store = FoodStore::load(Box::new(storage));

        assert_eq!(store.origin(), &DatasetOrigin::Persisted);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().name(), "Rice");
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let (mut store, _) = memory_store();
        let mut ids = HashSet::new();

        for i in 0..50 {
            let record = store
                .add(FoodFields::new(format!("Food {}", i), "Other", "1", 1.0))
                .unwrap();
            assert!(!record.id.is_blank());
            assert!(ids.insert(record.id));
        }
        assert_eq!(store.len(), 50);
    }

    #[test]
    fn test_add_appends_and_persists() {
        let (mut store, storage) = memory_store();

        let record = store.add(apple()).unwrap();

        assert_eq!(store.list().last(), Some(&record));
        assert_eq!(saved_records(&storage), vec![record]);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let (mut store, storage) = memory_store();
        let first = store.add(apple()).unwrap();
        let second = store
            .add(FoodFields::new("Pear", "Fruit", "1", 100.0))
            .unwrap();
        let third = store
            .add(FoodFields::new("Plum", "Fruit", "1", 30.0))
            .unwrap();

        let mut changed = second.clone();
        changed.fields.calories = 101.0;
        changed.fields.brand = Some("Orchard".to_string());
        store.update(changed.clone()).unwrap();

        assert_eq!(store.list(), &[first, changed, third][..]);
        assert_eq!(saved_records(&storage), store.list());
    }

    #[test]
    fn test_update_missing_id() {
        let (mut store, storage) = memory_store();
        store.add(apple()).unwrap();
        let before = store.list().to_vec();
        let writes = storage.write_count();

        let ghost = FoodRecord::new(RecordId::new("ghost"), apple());
        let err = store.update(ghost).unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(store.list(), before.as_slice());
        assert_eq!(storage.write_count(), writes);
    }

    #[test]
    fn test_remove() {
        let (mut store, storage) = memory_store();
        let record = store.add(apple()).unwrap();

        let removed = store.remove(record.id.as_str()).unwrap();
        assert_eq!(removed, record);
        assert!(store.is_empty());
        assert!(saved_records(&storage).is_empty());
    }

    #[test]
    fn test_remove_missing_id_leaves_list_unchanged() {
        let (mut store, _) = memory_store();
        store.add(apple()).unwrap();
        let before = store.list().to_vec();

        let err = store.remove("nope").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref id } if id == "nope"));
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_clear_empties_and_persists() {
        let (mut store, storage) = memory_store();
        store.add(apple()).unwrap();
        store.add(apple()).unwrap();

        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.list().is_empty());
        assert_eq!(storage.get(DATASET_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_replace_all() {
        let (mut store, storage) = memory_store();
        store.add(apple()).unwrap();

        let replacement = sample_records();
        store.replace_all(replacement.clone()).unwrap();

        assert_eq!(store.list(), replacement.as_slice());
        assert_eq!(saved_records(&storage), replacement);
    }

    #[test]
    fn test_merge_reassigns_colliding_ids() {
        let (mut store, _) = memory_store();
        store.replace_all(sample_records()).unwrap();

        let incoming = vec![
            FoodRecord::new(RecordId::new("1"), FoodFields::new("Kiwi", "Fruit", "1", 42.0)),
            FoodRecord::new(RecordId::new("99"), FoodFields::new("Fig", "Fruit", "1", 37.0)),
        ];
        let summary = store.merge_all(incoming).unwrap();

        assert_eq!(summary, MergeSummary { added: 2, reassigned: 1 });
        assert_eq!(store.len(), 5);
        let kiwi = store.list().iter().find(|r| r.name() == "Kiwi").unwrap();
        assert_ne!(kiwi.id, "1");
        assert!(store.get("99").is_some());
        assert_eq!(store.get("1").unwrap().name(), "Apple");
    }

    #[test]
    fn test_import_json_replaces() {
        let (mut store, _) = memory_store();
        store.add(apple()).unwrap();

        let summary = store
            .import_json(r#"[{"name":""},{"name":"Banana"}]"#, ImportMode::Replace)
            .unwrap();

        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].name(), "Banana");
    }

    #[test]
    fn test_import_json_format_error_keeps_collection() {
        let (mut store, _) = memory_store();
        store.add(apple()).unwrap();

        let err = store
            .import_json("{\"name\":\"x\"}", ImportMode::Replace)
            .unwrap_err();
        assert!(matches!(err, StoreError::Format(FormatError::NotAnArray)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_round_trip_through_export_and_import() {
        let (mut store, _) = memory_store();
        store.replace_all(sample_records()).unwrap();
        store.add(apple()).unwrap();
        let before = store.list().to_vec();

        let text = codec::to_json(store.list()).unwrap();
        store.import_json(&text, ImportMode::Replace).unwrap();

        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_persistence_failure_keeps_mutation() {
        let (mut store, storage) = memory_store();
        storage.set_read_only(true);

        let err = store.add(apple()).unwrap_err();
        assert!(err.is_unsaved_change());
        assert!(err.recovery_suggestion().is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(storage.get(DATASET_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_listeners_receive_events() {
        let (mut store, _) = memory_store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |event: &StoreEvent| sink.borrow_mut().push(event.clone()));

        let record = store.add(apple()).unwrap();
        store.remove(record.id.as_str()).unwrap();
        store.clear().unwrap();

        let events = seen.borrow();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], StoreEvent::Added { ref name, .. } if name == "Apple"));
        assert!(matches!(events[1], StoreEvent::Removed { .. }));
        assert_eq!(events[2], StoreEvent::Cleared { removed: 0 });
    }

    #[test]
    fn test_find_by_prefix() {
        let storage = MemorySlotStorage::new();
        let records = vec![
            FoodRecord::new(RecordId::new("abc123"), apple()),
            FoodRecord::new(RecordId::new("abd456"), apple()),
        ];
        let store = FoodStore::with_records(Box::new(storage), records);

        assert_eq!(store.find("abc").unwrap().id, "abc123");
        assert!(store.find("ab").is_none());
        assert!(store.find("zzz").is_none());
        assert!(store.find("").is_none());
    }

    #[test]
    fn test_duplicate_ids_from_import_are_all_removed() {
        let (mut store, _) = memory_store();
        store
            .import_json(
                r#"[{"id":"d","name":"One"},{"id":"d","name":"Two"},{"id":"e","name":"Three"}]"#,
                ImportMode::Replace,
            )
            .unwrap();

        let removed = store.remove("d").unwrap();
        assert_eq!(removed.name(), "One");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_data_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let id;
        {
            let mut store = FoodStore::open_with_config(&config);
            assert_eq!(store.origin(), &DatasetOrigin::FirstRun);
            store.clear().unwrap();
            id = store.add(apple()).unwrap().id;
        }

        let store = FoodStore::open_with_config(&config);
        assert_eq!(store.origin(), &DatasetOrigin::Persisted);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id.as_str()).unwrap().name(), "Apple");
        assert!(config.dataset_path().exists());
    }

    #[test]
    fn test_corrupt_file_is_backed_up() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        std::fs::write(config.dataset_path(), "garbage").unwrap();

        let store = FoodStore::open_with_config(&config);
        match store.origin() {
            DatasetOrigin::Recovered { backup, .. } => {
                let backup = backup.as_ref().unwrap();
                assert_eq!(std::fs::read_to_string(backup).unwrap(), "garbage");
            }
            other => panic!("unexpected origin: {:?}", other),
        }
        assert!(!config.dataset_path().exists());
    }

    #[test]
    fn test_undecodable_file_is_backed_up_before_next_save() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let bytes = b"[{\"id\":\"a\",\"name\":\"Caf\xE9\"}]".to_vec();
        std::fs::write(config.dataset_path(), &bytes).unwrap();

        let mut store = FoodStore::open_with_config(&config);
        let backup = match store.origin() {
            DatasetOrigin::Recovered { backup, .. } => backup.clone().unwrap(),
            other => panic!("unexpected origin: {:?}", other),
        };
        assert_eq!(store.len(), sample_records().len());

        store.add(apple()).unwrap();
        assert_eq!(std::fs::read(&backup).unwrap(), bytes);
        assert!(config.dataset_path().exists());
    }

    #[test]
    fn test_listeners_see_persisted_collection() {
        let (mut store, storage) = memory_store();
        let saved_at_notify = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&saved_at_notify);
        let slot = storage.clone();
        store.subscribe(move |_: &StoreEvent| sink.borrow_mut().push(saved_records(&slot)));

        let record = store.add(apple()).unwrap();
        store.clear().unwrap();

        assert_eq!(*saved_at_notify.borrow(), vec![vec![record], Vec::new()]);
    }

    #[test]
    fn test_listeners_hear_about_unsaved_changes() {
        let (mut store, storage) = memory_store();
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        store.subscribe(move |_: &StoreEvent| *sink.borrow_mut() += 1);
        storage.set_read_only(true);

        assert!(store.add(apple()).unwrap_err().is_unsaved_change());
        assert_eq!(*seen.borrow(), 1);
    }
}
