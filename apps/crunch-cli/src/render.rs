//! Text rendering of store results. One logical result per line.

use crunch_common::Value;
use crunch_persist::{Snapshot, StoreError};

/// `[v1 v2 ... vn]`, or `[]` for an empty sequence.
pub fn sequence(values: &[Value]) -> String {
    let parts: Vec<String> = values.iter().map(Value::to_string).collect();
    format!("[{}]", parts.join(" "))
}

/// `[ [a b] [c d] ]`, or `[]` when there are no rows.
pub fn rows(rows: &[Vec<Value>]) -> String {
    if rows.is_empty() {
        return "[]".to_string();
    }
    let parts: Vec<String> = rows.iter().map(|r| sequence(r)).collect();
    format!("[ {} ]", parts.join(" "))
}

/// An optional aggregate: the value, or `nil`.
pub fn scalar(value: Option<Value>) -> String {
    value.map_or_else(|| "nil".to_string(), |v| v.to_string())
}

/// The fixed line printed for each store failure.
pub fn error(err: &StoreError) -> String {
    match err {
        StoreError::NoSuchKey(_) => "no such key".to_string(),
        StoreError::IndexOutOfRange { .. } => "index out of range".to_string(),
        StoreError::EmptySequence => "nil".to_string(),
        StoreError::NoSuchSnapshot(_) => "no such snapshot".to_string(),
        StoreError::InsufficientArguments { .. } => "not enough arguments".to_string(),
        StoreError::Io(e) => format!("io error: {e}"),
    }
}

/// Snapshot ids, one per line, most recent first.
pub fn snapshot_ids(snapshots: &[Snapshot]) -> String {
    let ids: Vec<String> = snapshots.iter().map(|s| s.id().to_string()).collect();
    ids.join("\n")
}
