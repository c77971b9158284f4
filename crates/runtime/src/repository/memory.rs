use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::repository::error::{RepositoryError, Result};
use crate::repository::{SaveRepository, validate_slot};
use crate::save::SaveData;

/// In-memory implementation of SaveRepository.
///
/// Saves are kept as encoded JSON so loading takes the same normalization
/// path as the file repository.
#[derive(Default)]
pub struct InMemorySaveRepo {
    slots: RwLock<BTreeMap<String, String>>,
}

impl InMemorySaveRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw JSON as-is, e.g. a legacy save fixture.
    pub fn insert_raw(&self, slot: &str, json: impl Into<String>) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(slot.to_string(), json.into());
        Ok(())
    }
}

impl SaveRepository for InMemorySaveRepo {
    fn save(&self, slot: &str, data: &SaveData) -> Result<()> {
        let json = data.to_json()?;
        self.insert_raw(slot, json)
    }

    fn load(&self, slot: &str) -> Result<Option<SaveData>> {
        validate_slot(slot)?;
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match slots.get(slot) {
            Some(json) => Ok(Some(SaveData::from_json(json)?.0)),
            None => Ok(None),
        }
    }

    fn exists(&self, slot: &str) -> bool {
        self.slots
            .read()
            .map(|slots| slots.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.keys().cloned().collect())
    }
}
