//! File-backed slot storage
//!
//! Each key maps to `<data_dir>/<key>.json`. Writes are atomic (write to a
//! temp file, then rename) so a crash never leaves a half-written dataset.
//!
//! Storage location: `~/.local/share/foodset/` (configurable via `Config`)

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::error::{IoAction, StorageError, StorageResult};
use super::slot::{SlotStats, SlotStorage};
use crate::config::Config;

/// Slot storage in a directory on disk
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    /// Create a storage handler rooted at `dir`
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage in the configured data directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the value for `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Where `quarantine` moves an unreadable value
    pub fn backup_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json.corrupt.backup", key))
    }
}

impl SlotStorage for FileSlotStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), bytes = content.len(), "Read slot");
                Ok(Some(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(IoAction::Read, e, path)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        atomic_write(&path, value.as_bytes())?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote slot");
        Ok(())
    }

    fn quarantine(&mut self, key: &str) -> StorageResult<Option<PathBuf>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let backup = self.backup_path_for(key);
        fs::rename(&path, &backup).map_err(|source| StorageError::Rename {
            from: path.clone(),
            to: backup.clone(),
            source,
        })?;
        warn!(backup = %backup.display(), "Moved unreadable dataset aside");
        Ok(Some(backup))
    }

    fn stats(&self, key: &str) -> SlotStats {
        match fs::metadata(self.path_for(key)) {
            Ok(meta) => SlotStats {
                exists: true,
                size: meta.len(),
                modified: meta.modified().ok().map(DateTime::<Utc>::from),
            },
            Err(_) => SlotStats::default(),
        }
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::DataDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // Temp file in the same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let write_err = |e| StorageError::io(IoAction::Write, e, temp_path.clone());
    let mut file = File::create(&temp_path).map_err(write_err)?;
    file.write_all(data).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::Rename {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
