//! Store change notifications
//!
//! Every applied mutation produces one `StoreEvent`, delivered to each
//! subscribed listener once the collection has been persisted (or the
//! write failed).

use std::fmt;

use tracing::info;

use crate::id::RecordId;

/// A change to the collection
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Added { id: RecordId, name: String },
    Updated { id: RecordId, name: String },
    Removed { id: RecordId, name: String },
    Cleared { removed: usize },
    Replaced { count: usize },
    Merged { added: usize, reassigned: usize },
}

impl StoreEvent {
    /// Short title for a notification
    pub fn title(&self) -> &'static str {
        match self {
            StoreEvent::Added { .. } => "Food Item Added",
            StoreEvent::Updated { .. } => "Food Item Updated",
            StoreEvent::Removed { .. } => "Food Item Deleted",
            StoreEvent::Cleared { .. } => "Dataset Cleared",
            StoreEvent::Replaced { .. } | StoreEvent::Merged { .. } => "Data Imported",
        }
    }

    /// Destructive changes are shown differently by front ends
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            StoreEvent::Removed { .. } | StoreEvent::Cleared { .. }
        )
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreEvent::Added { name, .. } => {
                write!(f, "{} has been added to the dataset.", name)
            }
            StoreEvent::Updated { name, .. } => {
                write!(f, "{} has been updated in the dataset.", name)
            }
            StoreEvent::Removed { name, .. } => {
                write!(f, "{} has been removed from the dataset.", name)
            }
            StoreEvent::Cleared { .. } => {
                write!(f, "All food items have been removed from the dataset.")
            }
            StoreEvent::Replaced { count } => {
                write!(f, "{} food items have been imported.", count)
            }
            StoreEvent::Merged { added, reassigned } if *reassigned > 0 => write!(
                f,
                "{} food items have been imported ({} given new ids).",
                added, reassigned
            ),
            StoreEvent::Merged { added, .. } => {
                write!(f, "{} food items have been imported.", added)
            }
        }
    }
}

/// Receives store events
pub trait StoreListener {
    fn on_event(&self, event: &StoreEvent);
}

impl<F> StoreListener for F
where
    F: Fn(&StoreEvent),
{
    fn on_event(&self, event: &StoreEvent) {
        self(event)
    }
}

/// Logs every event through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogListener;

impl StoreListener for LogListener {
    fn on_event(&self, event: &StoreEvent) {
        info!(event = event.title(), "{}", event);
    }
}
