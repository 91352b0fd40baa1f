//! Row model
//!
//! A row is an ordered mapping from column name to cell value. Column order
//! follows the header of the source the row was read from.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One record of a snapshot, keyed by column name
///
/// Absence of a column (`get` returns `None`) is distinct from an empty
/// cell (`get` returns `Some("")`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: IndexMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell value
    ///
    /// Re-inserting an existing column replaces its value but keeps its
    /// original position.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Get a cell value, or `None` if the column is absent from this row
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Column names in header order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// `(column, value)` pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Join the cells named by `columns` with `delimiter`
    ///
    /// Columns absent from this row render as empty cells.
    pub fn join(&self, columns: &[String], delimiter: char) -> String {
        let mut out = String::new();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                out.push(delimiter);
            }
            out.push_str(self.get(column).unwrap_or_default());
        }
        out
    }
}

impl<C, V> FromIterator<(C, V)> for Row
where
    C: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (C, V)>>(iter: T) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}
