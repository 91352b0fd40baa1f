//! Snapshot diff engine.
//!
//! Compares two loaded snapshots of the same log type and produces a
//! structured, deterministic diff suitable for console review or JSON export.
//!
//! ## Entry point
//!
//! ```
//! use logdelta_core::diff::{compute_diff, render_report};
//! use logdelta_core::loader::{load_snapshot_from_reader, LoadOptions};
//!
//! let opts = LoadOptions::default();
//! let old = load_snapshot_from_reader("id;status\n1;open\n".as_bytes(), "old", &opts).unwrap();
//! let new = load_snapshot_from_reader("id;status\n1;closed\n".as_bytes(), "new", &opts).unwrap();
//! let diff = compute_diff(&old, &new);
//! let report = render_report(&diff, &old, &new, ';');
//! assert!(report.contains("status: 'open' -> 'closed'"));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: key sets are sorted; per-key column changes follow the
//!   old row's header order.
//! - **Resolvability**: every key in `added` is in the new snapshot, every key
//!   in `removed` is in the old one, every key in `changed` is in both.
//! - **Old-driven columns**: only the old row's columns are compared. A column
//!   that exists only in the new snapshot never produces a change.

pub mod engine;
pub mod model;
pub mod report;

pub use engine::compute_diff;
pub use model::{ColumnChanges, DiffSummary, FieldChange, SnapshotDiff};
pub use report::{render_json, render_report};
