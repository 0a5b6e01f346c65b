use crunch_common::Value;

use crate::entry::Entry;

/// The live, mutable collection of entries.
///
/// Ordered most-recently-created first: a new key is inserted at the front and
/// keeps its position when its values are later replaced. Lookup is a linear
/// scan by exact key, which keeps iteration order trivially stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entries {
    entries: Vec<Entry>,
}

impl Entries {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key() == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.key() == key)
    }

    /// Replace the values of `key`, creating the entry at the front if absent.
    /// Returns `true` when a new entry was created.
    pub fn set(&mut self, key: &str, values: &[Value]) -> bool {
        match self.get_mut(key) {
            Some(entry) => {
                entry.set(values);
                false
            }
            None => {
                self.entries.insert(0, Entry::new(key, values));
                true
            }
        }
    }

    /// Remove an entry. Returns it if it existed.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let pos = self.entries.iter().position(|e| e.key() == key)?;
        Some(self.entries.remove(pos))
    }

    /// Resolve each key to its entry, preserving argument order.
    ///
    /// Keys that do not resolve are skipped, so the caller compares the
    /// lengths to detect misses. A key given twice resolves twice.
    pub fn resolve<'a, S: AsRef<str>>(&'a self, keys: &[S]) -> Vec<&'a Entry> {
        keys.iter().filter_map(|k| self.get(k.as_ref())).collect()
    }
}

impl From<Vec<Entry>> for Entries {
    /// Adopt a list of entries in the given order.
    ///
    /// Later duplicates of a key are dropped so the one-entry-per-key
    /// invariant holds even for hand-edited archive files.
    fn from(list: Vec<Entry>) -> Self {
        let mut entries: Vec<Entry> = Vec::with_capacity(list.len());
        for entry in list {
            if entries.iter().all(|e| e.key() != entry.key()) {
                entries.push(entry);
            }
        }
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Entries {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
