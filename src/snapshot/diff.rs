//! Order-insensitive comparison of snapshots.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::error_handling::SnapshotError;
use crate::snapshot::Snapshot;

/// Record types left out of the comparison.
///
/// SOA serials change on every zone reload without any meaningful change.
const IGNORED_KEYS: &[&str] = &["SOA"];

/// Decides whether `current` has to be written over `previous`.
///
/// Only the entry under `current.prefix` is compared. Values are compared as
/// multisets per record type over the union of types on both sides, with a
/// missing type equal to an empty list. Nested objects (the `_dmarc` block)
/// are compared per inner type.
///
/// # Returns
///
/// `true` when there is no previous document, when it has no entry for the
/// prefix, or when any non-ignored record type differs.
pub fn snapshot_changed(previous: Option<&Value>, current: &Snapshot) -> Result<bool, SnapshotError> {
    let Some(old_records) = previous.and_then(|document| document.get(&current.prefix)) else {
        return Ok(true);
    };
    let new_records = serde_json::to_value(&current.records)?;

    let old = flatten_records(old_records);
    let new = flatten_records(&new_records);

    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
    let empty = Vec::new();
    for key in keys {
        if IGNORED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let before = old.get(key).unwrap_or(&empty);
        let after = new.get(key).unwrap_or(&empty);
        if !multiset_eq(before, after) {
            log::debug!("Snapshot entry {key} changed: {before:?} -> {after:?}");
            return Ok(true);
        }
    }
    Ok(false)
}

/// Flattens a record mapping into `key -> values`.
///
/// Arrays map directly; nested objects contribute `outer/inner` keys; scalar
/// values become a one-element list. Non-string array elements are kept in
/// their JSON form.
pub fn flatten_records(records: &Value) -> BTreeMap<String, Vec<String>> {
    let mut flat = BTreeMap::new();
    if let Value::Object(map) = records {
        for (key, value) in map {
            match value {
                Value::Object(inner) => {
                    for (inner_key, inner_value) in inner {
                        flat.insert(format!("{key}/{inner_key}"), values_of(inner_value));
                    }
                }
                other => {
                    flat.insert(key.clone(), values_of(other));
                }
            }
        }
    }
    flat
}

fn values_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(text_of).collect(),
        Value::Null => Vec::new(),
        other => vec![text_of(other)],
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// True when both slices hold the same elements with the same multiplicities.
pub fn multiset_eq(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<&String> = a.iter().collect();
    let mut b: Vec<&String> = b.iter().collect();
    a.sort();
    b.sort();
    a == b
}
