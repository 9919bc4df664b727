//! Snapshot rendering, comparison and persistence.
//!
//! A snapshot is the resolution result of one name, keyed by its subdomain
//! prefix (`@` for an apex). It is persisted as
//! `<data_dir>/<canonical>.json` with sorted keys and fixed indentation so
//! version-control diffs stay readable, and rewritten only when its content
//! actually changed.

mod diff;
mod store;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::config::SNAPSHOT_INDENT;
use crate::dns::ResolutionResult;
use crate::error_handling::SnapshotError;

// Re-export public API
pub use diff::{flatten_records, multiset_eq, snapshot_changed};
pub use store::SnapshotStore;

/// The records of one name together with their grouping key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// `@` for an apex, otherwise the labels left of the registrable domain
    pub prefix: String,
    /// Gathered records
    pub records: ResolutionResult,
}

impl Snapshot {
    /// Builds the persisted document: `{ "<prefix>": { <records> } }`.
    ///
    /// Object keys come out sorted because `serde_json::Map` is ordered.
    pub fn to_value(&self) -> Result<Value, SnapshotError> {
        let mut document = Map::new();
        document.insert(self.prefix.clone(), serde_json::to_value(&self.records)?);
        Ok(Value::Object(document))
    }

    /// Renders the document with four-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, SnapshotError> {
        let value = self.to_value()?;
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(SNAPSHOT_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        value.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

#[cfg(test)]
mod tests;
