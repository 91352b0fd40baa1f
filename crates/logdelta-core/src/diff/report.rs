//! Console and JSON renderers for snapshot diffs.

use crate::diff::model::{DiffSummary, SnapshotDiff};
use crate::errors::Result;
use crate::model::Snapshot;
use serde::Serialize;

/// Rendered in place of a value for a column the new row does not have.
pub const ABSENT_MARKER: &str = "<absent>";

/// Render the human-readable comparison report.
///
/// Added rows are shown in full from `new`, removed rows in full from `old`,
/// changed rows as per-column `old -> new` lines followed by both full rows.
/// Full rows are joined with `delimiter` in their own snapshot's header order.
pub fn render_report(
    diff: &SnapshotDiff,
    old: &Snapshot,
    new: &Snapshot,
    delimiter: char,
) -> String {
    let mut out = String::new();

    out.push_str("\n=== Comparison Results ===\n\n");

    if diff.added.is_empty() {
        out.push_str("No added rows.\n");
    } else {
        out.push_str(&format!("Added rows ({}):\n", diff.added.len()));
        for key in &diff.added {
            out.push_str(&format!("  + {}:\n", key));
            out.push_str(&format!("    NEW: {}\n", full_row(new, key, delimiter)));
        }
    }

    if diff.removed.is_empty() {
        out.push_str("\nNo removed rows.\n");
    } else {
        out.push_str(&format!("\nRemoved rows ({}):\n", diff.removed.len()));
        for key in &diff.removed {
            out.push_str(&format!("  - {}:\n", key));
            out.push_str(&format!("    OLD: {}\n", full_row(old, key, delimiter)));
        }
    }

    if diff.changed.is_empty() {
        out.push_str("\nNo changed rows.\n");
    } else {
        out.push_str(&format!("\nChanged rows ({}):\n", diff.changed.len()));
        for (key, changes) in &diff.changed {
            out.push_str(&format!("  * {}:\n", key));
            for (column, change) in changes {
                let new_value = match &change.new {
                    Some(value) => format!("'{}'", value),
                    None => ABSENT_MARKER.to_string(),
                };
                out.push_str(&format!(
                    "      {}: '{}' -> {}\n",
                    column, change.old, new_value
                ));
            }
            out.push_str(&format!("    OLD: {}\n", full_row(old, key, delimiter)));
            out.push_str(&format!("    NEW: {}\n", full_row(new, key, delimiter)));
        }
    }

    out
}

fn full_row(snapshot: &Snapshot, key: &str, delimiter: char) -> String {
    snapshot
        .get(key)
        .map(|row| row.join(snapshot.columns(), delimiter))
        .unwrap_or_default()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: DiffSummary,
    #[serde(flatten)]
    diff: &'a SnapshotDiff,
}

/// Render the diff as pretty JSON with a summary block.
///
/// # Errors
///
/// `Serialization` if the diff cannot be encoded.
pub fn render_json(diff: &SnapshotDiff, old: &Snapshot) -> Result<String> {
    let report = JsonReport {
        summary: diff.summary(old),
        diff,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
