//! Set algebra across several entries.
//!
//! Every function takes the entries in argument order and returns a freshly
//! built result. `diff`, `inter` and `union` return ascending, deduplicated
//! sequences. `cartprod` keeps each entry's raw values, repeats included.

use std::collections::{BTreeSet, HashSet};

use crunch_common::Value;

use crate::entry::Entry;

/// Values that appear in exactly one of the entries, folded left to right.
///
/// Walks the entries in order keeping a set of values seen once and a pool of
/// values already seen. For each value of the current entry:
/// - already in the once-set: it is evicted from the once-set;
/// - otherwise already in the pool: ignored;
/// - otherwise staged for the once-set.
///
/// After the entry is walked, staged values join the once-set and all of the
/// entry's raw values join the pool. Repeats inside a single entry therefore
/// count once for that entry.
pub fn diff(entries: &[&Entry]) -> Vec<Value> {
    let mut once: BTreeSet<Value> = BTreeSet::new();
    let mut seen: HashSet<Value> = HashSet::new();

    for entry in entries {
        let mut staged: Vec<Value> = Vec::new();
        for &v in entry.values() {
            if once.remove(&v) {
                seen.insert(v);
            } else if seen.contains(&v) {
                continue;
            } else {
                staged.push(v);
            }
        }
        once.extend(staged);
        seen.extend(entry.values().iter().copied());
    }

    let out: Vec<Value> = once.into_iter().collect();
    tracing::trace!(entries = entries.len(), result = out.len(), "diff");
    out
}

/// Values present in every entry. Empty input gives an empty result.
pub fn inter(entries: &[&Entry]) -> Vec<Value> {
    let Some((first, rest)) = entries.split_first() else {
        return Vec::new();
    };
    let mut common: BTreeSet<Value> = first.values().iter().copied().collect();
    for entry in rest {
        let here: HashSet<Value> = entry.values().iter().copied().collect();
        common.retain(|v| here.contains(v));
    }

    let out: Vec<Value> = common.into_iter().collect();
    tracing::trace!(entries = entries.len(), result = out.len(), "inter");
    out
}

/// Values present in any entry.
pub fn union(entries: &[&Entry]) -> Vec<Value> {
    let all: BTreeSet<Value> = entries
        .iter()
        .flat_map(|e| e.values().iter().copied())
        .collect();

    let out: Vec<Value> = all.into_iter().collect();
    tracing::trace!(entries = entries.len(), result = out.len(), "union");
    out
}

/// Left-associative Cartesian product of the entries' raw values.
///
/// Rows come out in row-major order: existing rows in order, each extended by
/// the next entry's values in order. A single entry yields one single-value row
/// per value; no entries yield no rows. Any empty entry empties the product.
pub fn cartprod(entries: &[&Entry]) -> Vec<Vec<Value>> {
    let Some((first, rest)) = entries.split_first() else {
        return Vec::new();
    };
    let mut rows: Vec<Vec<Value>> = first.values().iter().map(|&v| vec![v]).collect();
    for entry in rest {
        let mut next_rows = Vec::with_capacity(rows.len() * entry.len());
        for row in &rows {
            for &v in entry.values() {
                let mut next = row.clone();
                next.push(v);
                next_rows.push(next);
            }
        }
        rows = next_rows;
    }

    tracing::trace!(entries = entries.len(), rows = rows.len(), "cartprod");
    rows
}
