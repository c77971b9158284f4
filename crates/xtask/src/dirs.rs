//! Platform-specific directory utilities

use std::path::PathBuf;

use zone_runtime::FileSaveRepository;

/// Environment variable overriding the save directory.
pub const SAVE_DIR_ENV: &str = "SAVE_DATA_DIR";

/// Get the save directory
///
/// `$SAVE_DATA_DIR` when set, otherwise the platform data directory
/// (e.g. `~/.local/share/zonegen/saves` on Linux).
pub fn save_dir() -> PathBuf {
    match std::env::var_os(SAVE_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => FileSaveRepository::default_dir(),
    }
}
