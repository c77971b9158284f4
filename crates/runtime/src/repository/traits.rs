//! Repository contract for saving and loading player progress.

use crate::repository::error::{RepositoryError, Result};
use crate::save::SaveData;

/// Named save slots.
///
/// Loading always runs delta normalization, so callers never see legacy or
/// damaged delta records.
pub trait SaveRepository: Send + Sync {
    fn save(&self, slot: &str, data: &SaveData) -> Result<()>;

    /// `Ok(None)` when the slot has never been written.
    fn load(&self, slot: &str) -> Result<Option<SaveData>>;

    fn exists(&self, slot: &str) -> bool;

    fn delete(&self, slot: &str) -> Result<()>;

    /// Slot names in ascending order.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}

/// Slot names are limited to ASCII alphanumerics, `_` and `-`.
pub fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_string()))
    }
}
