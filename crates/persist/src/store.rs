//! The store: live entries plus the snapshot history.
//!
//! Every key-addressed operation resolves the key by exact match against the
//! live entries and fails with [`StoreError::NoSuchKey`] when it is absent.
//! Snapshots are kept most-recent-first.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crunch_common::{SnapshotId, Value};
use crunch_kernel::{Entries, Entry, EntryError, algebra};

use crate::config::{EmptyAggregate, StoreConfig};
use crate::snapshot::Snapshot;

/// Errors reported by store operations. None of them leave the store unusable.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no such key: {0}")]
    NoSuchKey(String),
    #[error("index {index} out of range for {len} values")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("sequence is empty")]
    EmptySequence,
    #[error("no such snapshot: {0}")]
    NoSuchSnapshot(SnapshotId),
    #[error("need at least two existing keys, got {resolved} of {supplied}")]
    InsufficientArguments { supplied: usize, resolved: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<EntryError> for StoreError {
    fn from(err: EntryError) -> Self {
        match err {
            EntryError::IndexOutOfRange { index, len } => Self::IndexOutOfRange { index, len },
            EntryError::EmptySequence => Self::EmptySequence,
        }
    }
}

/// In-memory store of integer sequences with point-in-time snapshots.
#[derive(Debug, Default)]
pub struct Store {
    config: StoreConfig,
    entries: Entries,
    /// Most recent first.
    snapshots: Vec<Snapshot>,
    next_id: SnapshotId,
}

impl Store {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The live entries, most recently created first.
    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    /// The snapshot history, most recent first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn find_snapshot(&self, id: SnapshotId) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.id() == id)
    }

    // -- entry operations -------------------------------------------------

    /// A copy of the values stored under `key`.
    pub fn get(&self, key: &str) -> Result<Vec<Value>, StoreError> {
        Ok(self.entry(key)?.get())
    }

    /// Replace the values of `key`, creating it at the front when new.
    pub fn set(&mut self, key: &str, values: &[Value]) {
        let created = self.entries.set(key, values);
        tracing::debug!(key, len = values.len(), created, "set");
    }

    /// Remove `key` from the live entries. Snapshots keep their copies.
    pub fn del(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries
            .remove(key)
            .ok_or_else(|| StoreError::NoSuchKey(key.to_string()))?;
        tracing::debug!(key, "deleted");
        Ok(())
    }

    /// Remove `key` from the live entries and from every snapshot.
    ///
    /// Succeeds whether or not the key exists anywhere.
    pub fn purge(&mut self, key: &str) {
        let live = self.entries.remove(key).is_some();
        let mut purged = 0;
        for snapshot in &mut self.snapshots {
            if snapshot.remove_key(key) {
                purged += 1;
            }
        }
        tracing::debug!(key, live, snapshots = purged, "purged");
    }

    pub fn push(&mut self, key: &str, values: &[Value]) -> Result<(), StoreError> {
        self.entry_mut(key)?.push(values);
        tracing::debug!(key, len = values.len(), "push");
        Ok(())
    }

    pub fn append(&mut self, key: &str, values: &[Value]) -> Result<(), StoreError> {
        self.entry_mut(key)?.append(values);
        tracing::debug!(key, len = values.len(), "append");
        Ok(())
    }

    /// Value at 1-based `index`.
    pub fn pick(&self, key: &str, index: i64) -> Result<Value, StoreError> {
        Ok(self.entry(key)?.pick(index)?)
    }

    /// Remove and return the value at 1-based `index`.
    pub fn pluck(&mut self, key: &str, index: i64) -> Result<Value, StoreError> {
        Ok(self.entry_mut(key)?.pluck(index)?)
    }

    /// Remove and return the front value.
    pub fn pop(&mut self, key: &str) -> Result<Value, StoreError> {
        Ok(self.entry_mut(key)?.pop()?)
    }

    /// Smallest value. An empty sequence is reported per [`EmptyAggregate`].
    pub fn min(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.aggregate(key, Entry::min)
    }

    /// Largest value. An empty sequence is reported per [`EmptyAggregate`].
    pub fn max(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.aggregate(key, Entry::max)
    }

    /// Sum of the values. An empty sequence is reported per [`EmptyAggregate`].
    pub fn sum(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.aggregate(key, Entry::sum)
    }

    pub fn len(&self, key: &str) -> Result<usize, StoreError> {
        Ok(self.entry(key)?.len())
    }

    pub fn rev(&mut self, key: &str) -> Result<(), StoreError> {
        self.entry_mut(key)?.rev();
        Ok(())
    }

    pub fn uniq(&mut self, key: &str) -> Result<(), StoreError> {
        self.entry_mut(key)?.uniq();
        Ok(())
    }

    pub fn sort(&mut self, key: &str) -> Result<(), StoreError> {
        self.entry_mut(key)?.sort();
        Ok(())
    }

    // -- set algebra ------------------------------------------------------

    pub fn diff<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<Value>, StoreError> {
        Ok(algebra::diff(&self.resolve(keys)?))
    }

    pub fn inter<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<Value>, StoreError> {
        Ok(algebra::inter(&self.resolve(keys)?))
    }

    pub fn union<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<Value>, StoreError> {
        Ok(algebra::union(&self.resolve(keys)?))
    }

    pub fn cartprod<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<Vec<Value>>, StoreError> {
        Ok(algebra::cartprod(&self.resolve(keys)?))
    }

    // -- snapshots --------------------------------------------------------

    /// Capture the live entries as the newest snapshot and return its id.
    pub fn snapshot(&mut self) -> SnapshotId {
        let id = self.next_id;
        self.next_id = id.next();
        self.snapshots.insert(0, Snapshot::capture(id, &self.entries));
        tracing::info!(%id, entries = self.entries.len(), "snapshot captured");
        id
    }

    /// Delete one snapshot, wherever it sits in the history.
    pub fn drop_snapshot(&mut self, id: SnapshotId) -> Result<(), StoreError> {
        let pos = self.snapshot_position(id)?;
        self.snapshots.remove(pos);
        tracing::info!(%id, "snapshot dropped");
        Ok(())
    }

    /// Restore the live entries to snapshot `id`.
    ///
    /// The target and every snapshot taken after it are discarded; only
    /// strictly older snapshots remain.
    pub fn rollback(&mut self, id: SnapshotId) -> Result<(), StoreError> {
        let pos = self.snapshot_position(id)?;
        self.entries = self.snapshots[pos].materialize();
        self.snapshots.drain(..=pos);
        tracing::info!(
            %id,
            entries = self.entries.len(),
            remaining = self.snapshots.len(),
            "rolled back"
        );
        Ok(())
    }

    /// Replace the live entries with a copy of snapshot `id`. History is untouched.
    pub fn checkout(&mut self, id: SnapshotId) -> Result<(), StoreError> {
        let pos = self.snapshot_position(id)?;
        self.entries = self.snapshots[pos].materialize();
        tracing::info!(%id, entries = self.entries.len(), "checked out");
        Ok(())
    }

    /// Write snapshot `id` to `path` in archive format.
    pub fn archive(&self, id: SnapshotId, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let snapshot = self
            .find_snapshot(id)
            .ok_or(StoreError::NoSuchSnapshot(id))?;
        snapshot.serialize(BufWriter::new(File::create(path)?))?;
        tracing::info!(%id, path = %path.display(), "snapshot archived");
        Ok(())
    }

    /// Replace the live entries with the contents of an archive file and clear
    /// the whole snapshot history. Returns the number of entries loaded.
    ///
    /// The file is read completely before anything changes, so an I/O failure
    /// leaves the store as it was. Malformed lines are skipped, not errors.
    pub fn restore(&mut self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let loaded = Snapshot::deserialize(BufReader::new(File::open(path)?))?;
        self.entries = Entries::from(loaded);
        self.snapshots.clear();
        self.next_id = SnapshotId::FIRST;
        tracing::info!(path = %path.display(), entries = self.entries.len(), "restored");
        Ok(self.entries.len())
    }

    // -- helpers ----------------------------------------------------------

    fn entry(&self, key: &str) -> Result<&Entry, StoreError> {
        self.entries
            .get(key)
            .ok_or_else(|| StoreError::NoSuchKey(key.to_string()))
    }

    fn entry_mut(&mut self, key: &str) -> Result<&mut Entry, StoreError> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| StoreError::NoSuchKey(key.to_string()))
    }

    fn aggregate(
        &self,
        key: &str,
        op: impl Fn(&Entry) -> Value,
    ) -> Result<Option<Value>, StoreError> {
        let entry = self.entry(key)?;
        if entry.is_empty() && self.config.empty_aggregate == EmptyAggregate::Nil {
            return Ok(None);
        }
        Ok(Some(op(entry)))
    }

    /// Resolve keys for set algebra: at least two, all of them live.
    fn resolve<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<&Entry>, StoreError> {
        let found = self.entries.resolve(keys);
        if keys.len() < 2 || found.len() != keys.len() {
            return Err(StoreError::InsufficientArguments {
                supplied: keys.len(),
                resolved: found.len(),
            });
        }
        Ok(found)
    }

    fn snapshot_position(&self, id: SnapshotId) -> Result<usize, StoreError> {
        self.snapshots
            .iter()
            .position(|s| s.id() == id)
            .ok_or(StoreError::NoSuchSnapshot(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(pairs: &[(&str, &[Value])]) -> Store {
        let mut store = Store::new();
        for (key, values) in pairs {
            store.set(key, values);
        }
        store
    }

    fn ids(store: &Store) -> Vec<u64> {
        store.snapshots().iter().map(|s| s.id().0).collect()
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut store = Store::new();
        store.set("a", &[3, 1, 2, 2]);
        assert_eq!(store.get("a").unwrap(), vec![3, 1, 2, 2]);

        store.set("a", &[]);
        assert_eq!(store.get("a").unwrap(), Vec::<Value>::new());
    }

    #[test]
    fn get_copy_does_not_touch_store() {
        let store = store_with(&[("a", &[1, 2])]);
        let mut copy = store.get("a").unwrap();
        copy.clear();
        assert_eq!(store.get("a").unwrap(), vec![1, 2]);
    }

    #[test]
    fn missing_key_is_reported_everywhere() {
        let mut store = Store::new();
        assert!(matches!(store.get("x"), Err(StoreError::NoSuchKey(k)) if k == "x"));
        assert!(matches!(store.del("x"), Err(StoreError::NoSuchKey(_))));
        assert!(matches!(store.push("x", &[1]), Err(StoreError::NoSuchKey(_))));
        assert!(matches!(store.append("x", &[1]), Err(StoreError::NoSuchKey(_))));
        assert!(matches!(store.pick("x", 1), Err(StoreError::NoSuchKey(_))));
        assert!(matches!(store.pluck("x", 1), Err(StoreError::NoSuchKey(_))));
        assert!(matches!(store.pop("x"), Err(StoreError::NoSuchKey(_))));
        assert!(matches!(store.min("x"), Err(StoreError::NoSuchKey(_))));
        assert!(matches!(store.max("x"), Err(StoreError::NoSuchKey(_))));
        assert!(matches!(store.sum("x"), Err(StoreError::NoSuchKey(_))));
        assert!(matches!(store.len("x"), Err(StoreError::NoSuchKey(_))));
        assert!(matches!(store.rev("x"), Err(StoreError::NoSuchKey(_))));
        assert!(matches!(store.uniq("x"), Err(StoreError::NoSuchKey(_))));
        assert!(matches!(store.sort("x"), Err(StoreError::NoSuchKey(_))));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn new_keys_listed_most_recent_first() {
        let mut store = store_with(&[("a", &[1]), ("b", &[2]), ("c", &[3])]);
        store.set("a", &[4]);
        let keys: Vec<&str> = store.entries().keys().collect();
        assert_eq!(keys, vec!["c", "b", "a"]);
    }

    #[test]
    fn positional_operations() {
        let mut store = store_with(&[("a", &[10, 20, 30])]);
        assert_eq!(store.pick("a", 1).unwrap(), 10);
        assert!(matches!(
            store.pick("a", 0),
            Err(StoreError::IndexOutOfRange { index: 0, len: 3 })
        ));
        assert!(matches!(
            store.pick("a", 4),
            Err(StoreError::IndexOutOfRange { index: 4, len: 3 })
        ));

        assert_eq!(store.pluck("a", 2).unwrap(), 20);
        assert_eq!(store.pop("a").unwrap(), 10);
        assert_eq!(store.pop("a").unwrap(), 30);
        assert!(matches!(store.pop("a"), Err(StoreError::EmptySequence)));
    }

    #[test]
    fn push_and_append() {
        let mut store = store_with(&[("a", &[9])]);
        store.push("a", &[1, 2, 3]).unwrap();
        store.append("a", &[4, 5]).unwrap();
        assert_eq!(store.get("a").unwrap(), vec![3, 2, 1, 9, 4, 5]);
    }

    #[test]
    fn in_place_reordering() {
        let mut store = store_with(&[("a", &[1, 1, 3, 2, 2, 1])]);
        store.uniq("a").unwrap();
        assert_eq!(store.get("a").unwrap(), vec![1, 3, 2, 1]);
        store.sort("a").unwrap();
        assert_eq!(store.get("a").unwrap(), vec![1, 1, 2, 3]);
        store.rev("a").unwrap();
        assert_eq!(store.get("a").unwrap(), vec![3, 2, 1, 1]);
        assert_eq!(store.len("a").unwrap(), 4);
    }

    #[test]
    fn aggregates_report_nil_on_empty_by_default() {
        let store = store_with(&[("a", &[4, -2, 7]), ("e", &[])]);
        assert_eq!(store.min("a").unwrap(), Some(-2));
        assert_eq!(store.max("a").unwrap(), Some(7));
        assert_eq!(store.sum("a").unwrap(), Some(9));
        assert_eq!(store.min("e").unwrap(), None);
        assert_eq!(store.max("e").unwrap(), None);
        assert_eq!(store.sum("e").unwrap(), None);
        assert_eq!(store.len("e").unwrap(), 0);
    }

    #[test]
    fn aggregates_zero_policy_keeps_sentinel() {
        let mut store = Store::with_config(StoreConfig {
            empty_aggregate: EmptyAggregate::Zero,
        });
        store.set("e", &[]);
        assert_eq!(store.min("e").unwrap(), Some(0));
        assert_eq!(store.max("e").unwrap(), Some(0));
        assert_eq!(store.sum("e").unwrap(), Some(0));
    }

    #[test]
    fn set_algebra_through_store() {
        let store = store_with(&[("a", &[1, 2, 3]), ("b", &[2, 3, 4])]);
        assert_eq!(store.diff(&["a", "b"]).unwrap(), vec![1, 4]);
        assert_eq!(store.inter(&["a", "b"]).unwrap(), vec![2, 3]);
        assert_eq!(store.union(&["a", "b"]).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(store.cartprod(&["a", "b"]).unwrap().len(), 9);
    }

    #[test]
    fn set_algebra_needs_two_resolved_keys() {
        let store = store_with(&[("a", &[1]), ("b", &[2])]);
        assert!(matches!(
            store.union(&["a"]),
            Err(StoreError::InsufficientArguments {
                supplied: 1,
                resolved: 1
            })
        ));
        assert!(matches!(
            store.diff(&["a", "missing"]),
            Err(StoreError::InsufficientArguments {
                supplied: 2,
                resolved: 1
            })
        ));
        assert!(matches!(
            store.inter(&["a", "b", "c"]),
            Err(StoreError::InsufficientArguments { .. })
        ));
        assert!(matches!(
            store.cartprod::<&str>(&[]),
            Err(StoreError::InsufficientArguments { .. })
        ));
    }

    #[test]
    fn snapshot_ids_count_up() {
        let mut store = Store::new();
        assert_eq!(store.snapshot(), SnapshotId(1));
        assert_eq!(store.snapshot(), SnapshotId(2));
        assert_eq!(store.snapshot(), SnapshotId(3));
        assert_eq!(ids(&store), vec![3, 2, 1]);
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut store = store_with(&[("k", &[1, 2])]);
        let id = store.snapshot();

        store.append("k", &[3]).unwrap();
        store.set("new", &[5]);
        store.del("k").unwrap();

        let snap = store.find_snapshot(id).unwrap();
        assert_eq!(snap.entries().get("k").unwrap().values(), &[1, 2]);
        assert!(!snap.has_key("new"));
    }

    #[test]
    fn drop_snapshot_anywhere_in_history() {
        let mut store = Store::new();
        store.snapshot();
        store.snapshot();
        store.snapshot();

        store.drop_snapshot(SnapshotId(2)).unwrap();
        assert_eq!(ids(&store), vec![3, 1]);
        assert!(matches!(
            store.drop_snapshot(SnapshotId(2)),
            Err(StoreError::NoSuchSnapshot(SnapshotId(2)))
        ));

        // Ids are not handed out again after a drop.
        assert_eq!(store.snapshot(), SnapshotId(4));
        assert_eq!(ids(&store), vec![4, 3, 1]);
    }

    #[test]
    fn rollback_restores_and_keeps_only_older_snapshots() {
        let mut store = store_with(&[("a", &[1])]);
        store.snapshot(); // 1
        store.set("a", &[2]);
        store.snapshot(); // 2
        store.set("a", &[3]);
        store.set("b", &[30]);
        store.snapshot(); // 3
        store.set("a", &[4]);

        store.rollback(SnapshotId(2)).unwrap();
        assert_eq!(store.get("a").unwrap(), vec![2]);
        assert!(matches!(store.get("b"), Err(StoreError::NoSuchKey(_))));
        assert_eq!(ids(&store), vec![1]);
    }

    #[test]
    fn rollback_to_newest_discards_only_it() {
        let mut store = store_with(&[("a", &[1])]);
        store.snapshot();
        store.snapshot();
        store.set("a", &[9]);

        store.rollback(SnapshotId(2)).unwrap();
        assert_eq!(store.get("a").unwrap(), vec![1]);
        assert_eq!(ids(&store), vec![1]);
    }

    #[test]
    fn rollback_unknown_id_changes_nothing() {
        let mut store = store_with(&[("a", &[1])]);
        store.snapshot();
        store.set("a", &[2]);
        assert!(matches!(
            store.rollback(SnapshotId(7)),
            Err(StoreError::NoSuchSnapshot(_))
        ));
        assert_eq!(store.get("a").unwrap(), vec![2]);
        assert_eq!(ids(&store), vec![1]);
    }

    #[test]
    fn checkout_keeps_history() {
        let mut store = store_with(&[("a", &[1])]);
        store.snapshot();
        store.set("a", &[2]);
        store.snapshot();
        store.set("a", &[3]);

        store.checkout(SnapshotId(1)).unwrap();
        assert_eq!(store.get("a").unwrap(), vec![1]);
        assert_eq!(ids(&store), vec![2, 1]);

        // The checked-out state is a copy, not the snapshot itself.
        store.append("a", &[100]).unwrap();
        let snap = store.find_snapshot(SnapshotId(1)).unwrap();
        assert_eq!(snap.entries().get("a").unwrap().values(), &[1]);

        assert!(matches!(
            store.checkout(SnapshotId(9)),
            Err(StoreError::NoSuchSnapshot(_))
        ));
    }

    #[test]
    fn purge_removes_key_everywhere() {
        let mut store = store_with(&[("a", &[1]), ("b", &[2])]);
        store.snapshot();
        store.del("a").unwrap();
        store.snapshot();
        store.set("a", &[3]);

        store.purge("a");
        assert!(matches!(store.get("a"), Err(StoreError::NoSuchKey(_))));
        assert!(store.snapshots().iter().all(|s| !s.has_key("a")));
        assert!(store.snapshots().iter().all(|s| s.has_key("b")));

        // Purging an unknown key is still fine.
        store.purge("nope");
    }

    #[test]
    fn archive_unknown_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new();
        assert!(matches!(
            store.archive(SnapshotId(1), tmp.path().join("x.txt")),
            Err(StoreError::NoSuchSnapshot(_))
        ));
        assert!(!tmp.path().join("x.txt").exists());
    }

    #[test]
    fn archive_then_restore_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("snap.txt");

        let mut store = store_with(&[("a", &[1, 2, 3]), ("b", &[-5]), ("c", &[7, 7])]);
        let id = store.snapshot();
        store.archive(id, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "c|7,7\nb|-5\na|1,2,3\n");

        let mut other = store_with(&[("zzz", &[0])]);
        other.snapshot();
        other.snapshot();
        assert_eq!(other.restore(&path).unwrap(), 3);

        let archived = store.find_snapshot(id).unwrap().entries();
        assert_eq!(other.entries(), archived);
        assert!(other.snapshots().is_empty());
        assert_eq!(other.snapshot(), SnapshotId(1));
    }

    #[test]
    fn purged_key_never_reaches_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("snap.txt");

        let mut store = store_with(&[("secret", &[1]), ("kept", &[2])]);
        let id = store.snapshot();
        store.purge("secret");
        store.archive(id, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kept|2\n");
    }

    #[test]
    fn restore_skips_malformed_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hand_written.txt");
        std::fs::write(&path, "a|1,x,2\n|5\nb|\nnoise\nc|3\n").unwrap();

        let mut store = Store::new();
        assert_eq!(store.restore(&path).unwrap(), 2);
        assert_eq!(store.get("a").unwrap(), vec![1, 2]);
        assert_eq!(store.get("c").unwrap(), vec![3]);
        assert!(matches!(store.get("b"), Err(StoreError::NoSuchKey(_))));
    }

    #[test]
    fn restore_missing_file_leaves_state_unchanged() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = store_with(&[("a", &[1])]);
        store.snapshot();

        let err = store.restore(tmp.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(store.get("a").unwrap(), vec![1]);
        assert_eq!(ids(&store), vec![1]);
    }

    #[test]
    fn archive_to_bad_path_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = store_with(&[("a", &[1])]);
        let id = store.snapshot();
        let bad = tmp.path().join("no_such_dir").join("snap.txt");
        assert!(matches!(store.archive(id, bad), Err(StoreError::Io(_))));
    }

    #[test]
    fn restore_skips_lines_that_are_not_utf8() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("mixed.txt");
        std::fs::write(&path, b"good|1,2\nk\xff|3\nother|4\n").unwrap();

        let mut store = Store::new();
        assert_eq!(store.restore(&path).unwrap(), 2);
        assert_eq!(store.get("good").unwrap(), vec![1, 2]);
        assert_eq!(store.get("other").unwrap(), vec![4]);
    }

    #[test]
    fn key_with_delimiter_is_left_out_of_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("snap.txt");
        let mut store = store_with(&[("a|b", &[1]), ("c", &[2])]);
        let id = store.snapshot();
        store.archive(id, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "c|2\n");

        let mut other = Store::new();
        assert_eq!(other.restore(&path).unwrap(), 1);
        assert!(matches!(other.get("a|b"), Err(StoreError::NoSuchKey(_))));
    }
}
