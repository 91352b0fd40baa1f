//! Snapshot diff computation engine.
//!
//! The core entry point is [`compute_diff`], which takes two loaded snapshots
//! and produces a [`SnapshotDiff`].

use crate::diff::model::{ColumnChanges, FieldChange, SnapshotDiff};
use crate::model::{Row, Snapshot};
use std::collections::{BTreeMap, BTreeSet};

/// Compute a set-delta between two key sets.
///
/// Returns `(added, removed)` where added = in b but not a, removed = in a but not b.
fn key_delta(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> (BTreeSet<String>, BTreeSet<String>) {
    let added = b.difference(a).map(|k| k.to_string()).collect();
    let removed = a.difference(b).map(|k| k.to_string()).collect();
    (added, removed)
}

/// Compare one old row against the new row for the same key.
///
/// Iterates the old row's columns only, with exact string equality. A column
/// missing from `new_row` is reported with an absent new value.
pub fn compare_rows(old_row: &Row, new_row: &Row) -> ColumnChanges {
    old_row
        .iter()
        .filter_map(|(column, old_value)| {
            let new_value = new_row.get(column);
            if new_value == Some(old_value) {
                None
            } else {
                Some((
                    column.to_string(),
                    FieldChange::new(old_value, new_value.map(str::to_string)),
                ))
            }
        })
        .collect()
}

/// Compute the three-way diff between two snapshots.
///
/// Pure function of its arguments: neither snapshot is modified and no I/O
/// happens. Keys whose compared columns are all equal are left out of
/// `changed` entirely.
pub fn compute_diff(old: &Snapshot, new: &Snapshot) -> SnapshotDiff {
    let old_keys: BTreeSet<&str> = old.keys().collect();
    let new_keys: BTreeSet<&str> = new.keys().collect();
    let (added, removed) = key_delta(&old_keys, &new_keys);

    let mut changed: BTreeMap<String, ColumnChanges> = BTreeMap::new();
    for key in old_keys.intersection(&new_keys) {
        let (Some(old_row), Some(new_row)) = (old.get(key), new.get(key)) else {
            continue;
        };
        let changes = compare_rows(old_row, new_row);
        if !changes.is_empty() {
            changed.insert(key.to_string(), changes);
        }
    }

    tracing::debug!(
        added = added.len() as u64,
        removed = removed.len() as u64,
        changed = changed.len() as u64,
        "computed snapshot diff"
    );

    SnapshotDiff {
        added,
        removed,
        changed,
    }
}
