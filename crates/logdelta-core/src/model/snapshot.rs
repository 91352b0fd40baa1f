//! Snapshot model
//!
//! A snapshot is the keyed content of one timestamped log file. It is built
//! once through [`SnapshotBuilder`] and is immutable afterwards.
//!
//! ## Key policy
//!
//! - Records whose key cell is empty (or missing) are skipped.
//! - Duplicate keys are last-write-wins; the row keeps the position of the
//!   first occurrence and the collision is recorded in [`LoadStats`].

use crate::model::row::Row;
use indexmap::IndexMap;
use serde::Serialize;

/// Counters collected while building a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Data records seen (header excluded)
    pub records_read: usize,
    /// Records dropped because their key cell was empty
    pub skipped_empty_key: usize,
    /// Keys that were overwritten by a later record, one entry per overwrite
    pub key_collisions: Vec<String>,
}

/// Keyed rows of one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    key_column: String,
    columns: Vec<String>,
    rows: IndexMap<String, Row>,
    stats: LoadStats,
}

impl Snapshot {
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Header columns in source order, duplicates collapsed
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, key: &str) -> Option<&Row> {
        self.rows.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// `(key, row)` pairs in first-seen order
    pub fn rows(&self) -> impl Iterator<Item = (&str, &Row)> {
        self.rows.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }
}

/// Result of pushing one record into a [`SnapshotBuilder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// New key
    Inserted,
    /// Existing key overwritten (last-write-wins)
    Replaced,
    /// Key cell empty or missing; record not stored
    SkippedEmptyKey,
}

/// Incremental constructor for [`Snapshot`]
///
/// ```
/// use logdelta_core::model::{PushOutcome, SnapshotBuilder};
///
/// let header = vec!["id".to_string(), "status".to_string()];
/// let mut builder = SnapshotBuilder::new("id", header).unwrap();
/// assert_eq!(builder.push_record(["1", "open"]), PushOutcome::Inserted);
/// assert_eq!(builder.push_record(["1", "closed"]), PushOutcome::Replaced);
/// let snapshot = builder.finish();
/// assert_eq!(snapshot.get("1").and_then(|r| r.get("status")), Some("closed"));
/// ```
#[derive(Debug)]
pub struct SnapshotBuilder {
    key_column: String,
    header: Vec<String>,
    rows: IndexMap<String, Row>,
    stats: LoadStats,
}

impl SnapshotBuilder {
    /// Start a snapshot for `header`
    ///
    /// Returns `None` if `key_column` is not one of the header columns.
    pub fn new(key_column: impl Into<String>, header: Vec<String>) -> Option<Self> {
        let key_column = key_column.into();
        if !header.iter().any(|c| *c == key_column) {
            return None;
        }
        Some(Self {
            key_column,
            header,
            rows: IndexMap::new(),
            stats: LoadStats::default(),
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Add one record, values in header order
    ///
    /// Values beyond the header width are ignored and missing trailing values
    /// leave their columns absent; the loader rejects such records before they
    /// get here.
    pub fn push_record<I>(&mut self, values: I) -> PushOutcome
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.stats.records_read += 1;

        let row: Row = self
            .header
            .iter()
            .cloned()
            .zip(values.into_iter().map(Into::<String>::into))
            .collect();

        let key = match row.get(&self.key_column) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => {
                self.stats.skipped_empty_key += 1;
                return PushOutcome::SkippedEmptyKey;
            }
        };

        match self.rows.insert(key.clone(), row) {
            None => PushOutcome::Inserted,
            Some(_) => {
                self.stats.key_collisions.push(key);
                PushOutcome::Replaced
            }
        }
    }

    pub fn finish(self) -> Snapshot {
        let mut columns: Vec<String> = Vec::with_capacity(self.header.len());
        for column in self.header {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        Snapshot {
            key_column: self.key_column,
            columns,
            rows: self.rows,
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_builder_requires_key_column() {
        assert!(SnapshotBuilder::new("id", header(&["name", "status"])).is_none());
        assert!(SnapshotBuilder::new("id", header(&["id", "status"])).is_some());
    }

    #[test]
    fn test_builder_skips_empty_key() {
        let mut b = SnapshotBuilder::new("id", header(&["id", "status"])).unwrap();
        assert_eq!(b.push_record(["", "open"]), PushOutcome::SkippedEmptyKey);
        assert_eq!(b.push_record(["1", "open"]), PushOutcome::Inserted);
        let s = b.finish();
        assert_eq!(s.len(), 1);
        assert_eq!(s.stats().records_read, 2);
        assert_eq!(s.stats().skipped_empty_key, 1);
    }

    #[test]
    fn test_builder_last_write_wins_keeps_first_position() {
        let mut b = SnapshotBuilder::new("id", header(&["id", "v"])).unwrap();
        b.push_record(["7", "first"]);
        b.push_record(["8", "other"]);
        b.push_record(["7", "second"]);
        let s = b.finish();

        assert_eq!(s.get("7").and_then(|r| r.get("v")), Some("second"));
        assert_eq!(s.keys().collect::<Vec<_>>(), vec!["7", "8"]);
        assert_eq!(s.stats().key_collisions, vec!["7".to_string()]);
    }

    #[test]
    fn test_builder_collapses_duplicate_header_columns() {
        let mut b = SnapshotBuilder::new("id", header(&["id", "v", "v"])).unwrap();
        b.push_record(["1", "left", "right"]);
        let s = b.finish();

        assert_eq!(s.columns(), &["id".to_string(), "v".to_string()]);
        assert_eq!(s.get("1").and_then(|r| r.get("v")), Some("right"));
    }
}
