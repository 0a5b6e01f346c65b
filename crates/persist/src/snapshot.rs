use std::io::{self, BufRead, Write};

use crunch_common::SnapshotId;
use crunch_kernel::{Entries, Entry};

use crate::archive;

/// An id-tagged, deep copy of the live entries at capture time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    id: SnapshotId,
    entries: Entries,
}

impl Snapshot {
    /// Copy every entry of `live` into a new snapshot.
    pub fn capture(id: SnapshotId, live: &Entries) -> Self {
        Self {
            id,
            entries: live.clone(),
        }
    }

    pub fn id(&self) -> SnapshotId {
        self.id
    }

    /// Read-only access to the frozen entries, in capture order.
    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    /// Excise a key from this snapshot. Only `purge` does this.
    pub fn remove_key(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// A fresh deep copy of the frozen entries, for installing as live state.
    pub fn materialize(&self) -> Entries {
        self.entries.clone()
    }

    /// Write the entries in archive format.
    pub fn serialize<W: Write>(&self, writer: W) -> io::Result<()> {
        archive::write_entries(writer, &self.entries)
    }

    /// Read entries written by [`Snapshot::serialize`], skipping malformed lines.
    pub fn deserialize<R: BufRead>(reader: R) -> io::Result<Vec<Entry>> {
        archive::read_entries(reader)
    }
}
