//! Command handlers

use foodset_core::StoreError;

pub mod config;
pub mod food;
pub mod status;
pub mod transfer;

/// Wrap a failed store operation, adding what the user can do about it
pub fn store_error(err: StoreError, action: &str) -> anyhow::Error {
    let message = match err.recovery_suggestion() {
        Some(hint) => format!("Failed to {}. {}", action, hint),
        None => format!("Failed to {}", action),
    };
    anyhow::Error::new(err).context(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodset_core::{RecordId, StorageError};

    #[test]
    fn test_store_error_adds_hint_for_unsaved_changes() {
        let err = StoreError::Persistence(StorageError::ReadOnly {
            key: "foodDataset".to_string(),
        });
        let wrapped = store_error(err, "add food item");
        assert!(wrapped.to_string().starts_with("Failed to add food item. "));
        assert!(wrapped.downcast_ref::<StoreError>().unwrap().is_unsaved_change());
    }

    #[test]
    fn test_store_error_without_hint() {
        let err = StoreError::NotFound {
            id: RecordId::new("x"),
        };
        assert_eq!(store_error(err, "delete food item").to_string(), "Failed to delete food item");
    }
}
