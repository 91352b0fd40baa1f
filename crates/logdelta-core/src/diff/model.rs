//! Snapshot diff output types.
//!
//! Collections use `BTreeSet`/`BTreeMap` for deterministic serialization;
//! per-row column changes use `IndexMap` to keep header order.

use crate::model::Snapshot;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Old/new values for one differing column.
///
/// `new` is `None` when the new row has no such column at all, which is
/// distinct from `Some("")`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldChange {
    /// Value in the old row
    pub old: String,
    /// Value in the new row, `None` if the column is absent
    pub new: Option<String>,
}

impl FieldChange {
    pub fn new(old: impl Into<String>, new: Option<String>) -> Self {
        Self {
            old: old.into(),
            new,
        }
    }

    /// True when the new row lacks the column
    pub fn is_absent(&self) -> bool {
        self.new.is_none()
    }
}

/// Column name to change, in the old row's column order
pub type ColumnChanges = IndexMap<String, FieldChange>;

/// The three-way diff between an old and a new snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Keys in new but not old
    pub added: BTreeSet<String>,
    /// Keys in old but not new
    pub removed: BTreeSet<String>,
    /// Keys in both whose rows differ in at least one column
    pub changed: BTreeMap<String, ColumnChanges>,
}

/// Row counts for a diff
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    /// Keys present in both snapshots with identical compared columns
    pub unchanged: usize,
}

impl SnapshotDiff {
    /// True when nothing was added, removed, or changed
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Counts per category, given the old snapshot this diff was computed from
    pub fn summary(&self, old: &Snapshot) -> DiffSummary {
        let common = old.len().saturating_sub(self.removed.len());
        DiffSummary {
            added: self.added.len(),
            removed: self.removed.len(),
            changed: self.changed.len(),
            unchanged: common.saturating_sub(self.changed.len()),
        }
    }
}
