//! Storage errors
//!
//! I/O failures are classified by what was being attempted and why it
//! failed, so front ends can tell users what to do next.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// ENOSPC on Unix
const ENOSPC: i32 = 28;

/// What the storage layer was doing when I/O failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    Read,
    Write,
}

impl fmt::Display for IoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoAction::Read => write!(f, "read"),
            IoAction::Write => write!(f, "write"),
        }
    }
}

/// Errors from reading or writing a slot
#[derive(Error, Debug)]
pub enum StorageError {
    /// The data directory could not be created
    #[error("Cannot create data directory '{path}': {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied: cannot {action} '{path}'")]
    Denied {
        action: IoAction,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No space left to save '{path}'")]
    NoSpace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure
    #[error("Could not {action} '{path}': {source}")]
    Io {
        action: IoAction,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Moving a file into place (or aside) failed; the target is unchanged
    #[error("Could not move '{from}' to '{to}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The collection could not be encoded for saving
    #[error("Failed to encode dataset: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writes are switched off (in-memory storage)
    #[error("Storage slot '{key}' is read-only")]
    ReadOnly { key: String },
}

impl StorageError {
    /// Classify an I/O error raised while performing `action` on `path`
    pub fn io(action: IoAction, error: io::Error, path: PathBuf) -> Self {
        if error.kind() == io::ErrorKind::PermissionDenied {
            return StorageError::Denied {
                action,
                path,
                source: error,
            };
        }
        if action == IoAction::Write && is_out_of_space(&error) {
            return StorageError::NoSpace {
                path,
                source: error,
            };
        }
        StorageError::Io {
            action,
            path,
            source: error,
        }
    }

    /// What the user can do about this error, if anything
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::NoSpace { .. } => Some("Free up disk space and make the change again."),
            StorageError::Denied { .. } => {
                Some("Check ownership and permissions of the data directory.")
            }
            StorageError::DataDir { .. } => {
                Some("Set data_dir to a writable location with `foodset config set data_dir <path>`.")
            }
            StorageError::Rename { .. } => Some("The saved dataset is unchanged. Retry the last change."),
            StorageError::ReadOnly { .. } => Some("Changes last only until the program exits."),
            StorageError::Io { .. } | StorageError::Encode(_) => None,
        }
    }
}

fn is_out_of_space(error: &io::Error) -> bool {
    if error.raw_os_error() == Some(ENOSPC) {
        return true;
    }
    let msg = error.to_string().to_lowercase();
    ["no space left", "disk full", "quota exceeded", "not enough space"]
        .iter()
        .any(|needle| msg.contains(needle))
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
