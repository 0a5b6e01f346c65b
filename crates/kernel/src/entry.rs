use crunch_common::Value;

/// Errors from positional and front-removal operations on a single entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("index {index} out of range for {len} values")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("sequence is empty")]
    EmptySequence,
}

/// One key and its ordered sequence of integers.
///
/// The key is fixed at construction. Duplicate values and empty sequences are
/// allowed. `Clone` is a deep copy, which is what snapshots rely on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: String,
    values: Vec<Value>,
}

impl Entry {
    /// Create an entry holding a copy of `values`.
    pub fn new(key: impl Into<String>, values: &[Value]) -> Self {
        Self {
            key: key.into(),
            values: values.to_vec(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read-only view of the stored values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// A copy of the stored values. Mutating it never touches the entry.
    pub fn get(&self) -> Vec<Value> {
        self.values.clone()
    }

    /// Replace the values wholesale.
    pub fn set(&mut self, values: &[Value]) {
        self.values = values.to_vec();
    }

    /// Insert each value at the front, one at a time, in input order.
    ///
    /// The pushed block therefore ends up reversed: pushing `[1, 2, 3]` onto
    /// `[9]` gives `[3, 2, 1, 9]`.
    pub fn push(&mut self, values: &[Value]) {
        for &v in values {
            self.values.insert(0, v);
        }
    }

    /// Append the values to the back in order.
    pub fn append(&mut self, values: &[Value]) {
        self.values.extend_from_slice(values);
    }

    /// Value at 1-based `index`.
    pub fn pick(&self, index: i64) -> Result<Value, EntryError> {
        let pos = self.position(index)?;
        Ok(self.values[pos])
    }

    /// Remove and return the value at 1-based `index`.
    pub fn pluck(&mut self, index: i64) -> Result<Value, EntryError> {
        let pos = self.position(index)?;
        Ok(self.values.remove(pos))
    }

    /// Remove and return the front value.
    pub fn pop(&mut self) -> Result<Value, EntryError> {
        if self.values.is_empty() {
            return Err(EntryError::EmptySequence);
        }
        Ok(self.values.remove(0))
    }

    /// Smallest value, or `0` when the sequence is empty.
    ///
    /// The zero is indistinguishable from a stored zero; callers that care use
    /// [`Entry::checked_min`] or check [`Entry::len`] first.
    pub fn min(&self) -> Value {
        self.checked_min().unwrap_or(0)
    }

    /// Largest value, or `0` when the sequence is empty. See [`Entry::min`].
    pub fn max(&self) -> Value {
        self.checked_max().unwrap_or(0)
    }

    pub fn checked_min(&self) -> Option<Value> {
        self.values.iter().copied().min()
    }

    pub fn checked_max(&self) -> Option<Value> {
        self.values.iter().copied().max()
    }

    /// Sum of all values with wrapping arithmetic; `0` for an empty sequence.
    pub fn sum(&self) -> Value {
        self.values.iter().fold(0, |acc: Value, v| acc.wrapping_add(*v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reverse in place.
    pub fn rev(&mut self) {
        self.values.reverse();
    }

    /// Collapse runs of equal adjacent values. `[1, 1, 2, 1, 1]` becomes `[1, 2, 1]`.
    pub fn uniq(&mut self) {
        self.values.dedup();
    }

    /// Ascending sort.
    pub fn sort(&mut self) {
        self.values.sort();
    }

    fn position(&self, index: i64) -> Result<usize, EntryError> {
        let len = self.values.len();
        match usize::try_from(index) {
            Ok(i) if (1..=len).contains(&i) => Ok(i - 1),
            _ => Err(EntryError::IndexOutOfRange { index, len }),
        }
    }
}
