//! Conversion between the typed [`AllSettings`] aggregate and flat rows
//!
//! All conversions walk [`AllSettings::FIELDS`], so a new field takes part in
//! reads, writes and notifications as soon as it is declared there.

use super::defaults::DefaultCatalog;
use crate::contract::{AllSettings, FieldAccess, FieldKind, SettingRow, SettingsError};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Assign `value` to the field bound to `key`.
///
/// Returns `Ok(false)` when no field is bound to `key`: such rows are
/// generated internally and are not surfaced through the aggregate.
pub fn apply_row(settings: &mut AllSettings, key: &str, value: &str) -> Result<bool, SettingsError> {
    let Some(field) = AllSettings::field(key) else {
        return Ok(false);
    };

    match field.access {
        FieldAccess::Text { set, .. } => set(settings, value.to_string()),
        FieldAccess::Int { set, .. } => set(settings, parse_int(key, value)?),
    }
    Ok(true)
}

/// Canonical string form of every field, one row per field
pub fn flatten_to_rows(settings: &AllSettings) -> Vec<SettingRow> {
    AllSettings::FIELDS
        .iter()
        .map(|f| {
            let value = match f.access {
                FieldAccess::Text { get, .. } => get(settings).to_string(),
                FieldAccess::Int { get, .. } => get(settings).to_string(),
            };
            SettingRow::new(f.key, value)
        })
        .collect()
}

/// Build an aggregate from stored rows, filling gaps from `defaults`.
///
/// Any conversion failure aborts the whole read. A field left without a row
/// and without a default is a schema defect and reported as
/// [`SettingsError::MissingDefault`].
pub fn assemble(rows: &[SettingRow], defaults: &DefaultCatalog) -> Result<AllSettings, SettingsError> {
    let mut settings = AllSettings::default();
    let mut satisfied = HashSet::new();

    for row in rows {
        apply_row(&mut settings, &row.key, &row.value)?;
        satisfied.insert(row.key.as_str());
    }

    for (key, value) in defaults.iter() {
        if satisfied.contains(key) {
            continue;
        }
        apply_row(&mut settings, key, value)?;
        satisfied.insert(key);
    }

    if let Some(field) = AllSettings::FIELDS.iter().find(|f| !satisfied.contains(f.key)) {
        return Err(SettingsError::MissingDefault {
            key: field.key.to_string(),
        });
    }

    Ok(settings)
}

/// Typed JSON view of the aggregate, keyed by row key
pub fn snapshot(settings: &AllSettings) -> Map<String, Value> {
    AllSettings::FIELDS
        .iter()
        .map(|f| {
            let value = match f.access {
                FieldAccess::Text { get, .. } => Value::from(get(settings)),
                FieldAccess::Int { get, .. } => Value::from(get(settings)),
            };
            (f.key.to_string(), value)
        })
        .collect()
}

/// Parse a base-10 integer setting value. Stored integers are 32-bit; wider
/// values are rejected.
pub fn parse_int(key: &str, value: &str) -> Result<i64, SettingsError> {
    value.parse::<i32>().map(i64::from).map_err(|e| SettingsError::InvalidValue {
        key: key.to_string(),
        expected: FieldKind::Int.as_str(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}
