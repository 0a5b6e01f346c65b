use serde::{Deserialize, Serialize};
use std::fmt;

/// A single stored integer.
pub type Value = i64;

/// Identifier of a snapshot.
///
/// Ids start at 1 and increase with recency. They are never reassigned while
/// the snapshot history they belong to is alive, so gaps appear after drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotId(pub u64);

impl SnapshotId {
    /// The id handed to the first snapshot of a fresh history.
    pub const FIRST: Self = Self(1);

    /// The id that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
