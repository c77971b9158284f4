//! Repair and forward-migration of persisted delta records.
//!
//! Works on raw JSON so that damaged records (wrong types, missing maps,
//! legacy versions) can be salvaged field by field before typed decoding.
use serde_json::{Map, Value};
use tracing::warn;

use super::{NormalizationReport, ZoneDelta};
use crate::error::{CoreError, ErrorSeverity};

/// Errors raised while decoding a persisted delta store.
#[derive(Debug, thiserror::Error)]
pub enum DeltaError {
    #[error("zone delta store root must be a JSON object")]
    StoreNotAnObject,

    #[error("failed to decode zone deltas: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CoreError for DeltaError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::StoreNotAnObject => "DELTA_STORE_NOT_AN_OBJECT",
            Self::Decode(_) => "DELTA_DECODE_FAILED",
        }
    }
}

/// Repairs one record in place and returns whether anything changed.
///
/// - a non-object record is replaced by an empty current-version record
/// - every map key missing or not an object is reset to `{}`
/// - non-boolean map values are dropped
/// - versions below the current one are bumped; newer versions are left alone
///
/// Running it on an already normalized record is a no-op.
pub fn migrate_zone_delta(record: &mut Value) -> bool {
    let mut changed = false;
    if !record.is_object() {
        *record = Value::Object(Map::new());
        changed = true;
    }
    let Some(fields) = record.as_object_mut() else {
        return changed;
    };

    for key in ZoneDelta::MAP_KEYS {
        match fields.get_mut(key) {
            Some(Value::Object(map)) => {
                let invalid: Vec<String> = map
                    .iter()
                    .filter(|(_, value)| !value.is_boolean())
                    .map(|(entry, _)| entry.clone())
                    .collect();
                for entry in &invalid {
                    map.remove(entry);
                }
                changed |= !invalid.is_empty();
            }
            _ => {
                fields.insert(key.to_string(), Value::Object(Map::new()));
                changed = true;
            }
        }
    }

    let current = u64::from(ZoneDelta::CURRENT_VERSION);
    let up_to_date = fields
        .get("version")
        .and_then(Value::as_u64)
        .is_some_and(|version| version >= current);
    if !up_to_date {
        fields.insert("version".to_string(), Value::from(current));
        changed = true;
    }

    changed
}

/// Normalizes every record of a persisted store, keyed by zone id.
pub fn normalize_all_zone_deltas(records: &mut Map<String, Value>) -> NormalizationReport {
    let mut report = NormalizationReport {
        records: records.len(),
        repaired: Vec::new(),
    };
    for (zone_id, record) in records.iter_mut() {
        if migrate_zone_delta(record) {
            warn!(zone_id = %zone_id, "normalized zone delta record");
            report.repaired.push(zone_id.clone());
        }
    }
    report
}
