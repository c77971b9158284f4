//! Repair zone deltas in a save file.
//!
//! Accepts either a full save (`{"zoneDeltas": {...}, ...}`) or a bare
//! delta store object. A save root is recognised by any of its top-level
//! keys; one without `zoneDeltas` gets an empty store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde_json::{Map, Value};
use zone_core::{NormalizationReport, normalize_all_zone_deltas};

const SAVE_ROOT_KEYS: [&str; 3] = ["version", "worldSlots", "zoneDeltas"];

/// Repair legacy or damaged zone deltas in a save file
#[derive(Parser)]
pub struct NormalizeDeltas {
    /// Save file (JSON)
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Write the repaired file back in place
    #[arg(long)]
    write: bool,
}

impl NormalizeDeltas {
    pub fn execute(self) -> Result<()> {
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read save file: {}", self.path.display()))?;
        let mut root: Value = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse save file: {}", self.path.display()))?;

        let report = normalize_save(&mut root)?;

        println!(
            "{} {}",
            style("Records:").bold().cyan(),
            report.records
        );
        if report.is_clean() {
            println!("{}", style("All zone deltas are current").green());
            return Ok(());
        }
        println!(
            "{} {}",
            style("Repaired:").bold().yellow(),
            report.repaired.len()
        );
        for zone_id in &report.repaired {
            println!("  {zone_id}");
        }

        if self.write {
            std::fs::write(&self.path, serde_json::to_string_pretty(&root)?)
                .with_context(|| format!("Failed to write {}", self.path.display()))?;
            println!("{} {}", style("Wrote").bold().green(), self.path.display());
        } else {
            println!("{}", style("Dry run; pass --write to save").dim());
        }
        Ok(())
    }
}

/// Normalizes the delta store inside `root` in place.
fn normalize_save(root: &mut Value) -> Result<NormalizationReport> {
    let root = root
        .as_object_mut()
        .context("save file must be a JSON object")?;

    let is_save = SAVE_ROOT_KEYS.iter().any(|key| root.contains_key(*key));
    let records = if is_save {
        let store = root
            .entry("zoneDeltas")
            .or_insert_with(|| Value::Object(Map::new()));
        if store.is_null() {
            *store = Value::Object(Map::new());
        }
        store
            .as_object_mut()
            .context("zoneDeltas must be a JSON object")?
    } else {
        root
    };

    Ok(normalize_all_zone_deltas(records))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use zone_runtime::SaveData;

    use super::*;

    #[test]
    fn save_without_deltas_keeps_its_root() {
        let mut root = json!({
            "version": 1,
            "worldSlots": {
                "tutorial_zone": { "zoneId": "tutorial_zone", "seed": "1234" }
            }
        });
        let report = normalize_save(&mut root).unwrap();

        assert_eq!(report.records, 0);
        assert!(report.is_clean());
        assert_eq!(root["version"], json!(1));
        assert_eq!(root["zoneDeltas"], json!({}));
        assert!(root["worldSlots"]["tutorial_zone"].get("harvested").is_none());
        assert!(SaveData::from_json(&root.to_string()).is_ok());
    }

    #[test]
    fn nested_store_is_repaired() {
        let mut root = json!({
            "version": 1,
            "worldSlots": {},
            "zoneDeltas": { "grove": { "version": 1, "harvested": null } }
        });
        let report = normalize_save(&mut root).unwrap();

        assert_eq!(report.repaired, vec!["grove".to_string()]);
        assert_eq!(root["zoneDeltas"]["grove"]["harvested"], json!({}));
        assert_eq!(root["version"], json!(1));
    }

    #[test]
    fn bare_store_is_repaired() {
        let mut root = json!({ "grove": { "version": 1 } });
        let report = normalize_save(&mut root).unwrap();

        assert_eq!(report.repaired, vec!["grove".to_string()]);
        assert_eq!(root["grove"]["exploredTiles"], json!({}));
    }

    #[test]
    fn null_store_becomes_empty() {
        let mut root = json!({ "version": 1, "zoneDeltas": null });
        assert!(normalize_save(&mut root).unwrap().is_clean());
        assert_eq!(root["zoneDeltas"], json!({}));
    }
}
