//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::repository::error::Result;
use crate::repository::{SaveRepository, validate_slot};
use crate::save::SaveData;

/// File-based implementation of SaveRepository.
///
/// Saves are stored as `save_{slot}.json` (pretty-printed, camelCase keys)
/// and written through a temp file plus rename.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Platform data directory for saves.
    ///
    /// - macOS: `~/Library/Application Support/zonegen/saves`
    /// - Linux: `~/.local/share/zonegen/saves`
    /// - Windows: `%APPDATA%\zonegen\saves`
    /// - Fallback: `./save_data/saves`
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "zonegen")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./save_data"))
            .join("saves")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a save file.
    pub fn save_path(&self, slot: &str) -> Result<PathBuf> {
        validate_slot(slot)?;
        Ok(self.base_dir.join(format!("save_{}.json", slot)))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, data: &SaveData) -> Result<()> {
        let path = self.save_path(slot)?;
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, data.to_json()?)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved slot[{}] to {}", slot, path.display());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveData>> {
        let path = self.save_path(slot)?;
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let (data, report) = SaveData::from_json(&json)?;
        if !report.is_clean() {
            warn!(
                slot,
                repaired = report.repaired.len(),
                "repaired zone deltas while loading save; rewrite the slot to persist"
            );
        }
        debug!("Loaded slot[{}] from {}", slot, path.display());
        Ok(Some(data))
    }

    fn exists(&self, slot: &str) -> bool {
        self.save_path(slot).is_ok_and(|path| path.exists())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.save_path(slot)?;
        if path.exists() {
            fs::remove_file(&path)?;
            debug!("Deleted slot[{}]", slot);
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename
                    .strip_prefix("save_")
                    .and_then(|s| s.strip_suffix(".json"))
            {
                slots.push(slot.to_string());
            }
        }
        slots.sort_unstable();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryError;

    #[test]
    fn slot_names_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        assert!(repo.save_path("autosave-1").is_ok());
        assert!(matches!(
            repo.save_path("../outside"),
            Err(RepositoryError::InvalidSlot(_))
        ));
        assert!(repo.save_path("").is_err());
    }
}
