//! logdelta core
//!
//! Compares two timestamped versions of the same delimited log file, keyed by
//! one identifier column, and reports added, removed and changed rows.
//!
//! - [`loader`] reads a file into an immutable [`model::Snapshot`]
//! - [`diff`] computes and renders the three-way [`diff::SnapshotDiff`]
//! - [`housekeeping`] stamps, organizes and catalogs the logs directory
//! - [`session`] holds the selection for one comparison request
//! - [`config`] resolves settings from defaults, file and flags

pub mod config;
pub mod diff;
pub mod errors;
pub mod housekeeping;
pub mod loader;
pub mod logging_facility;
pub mod model;
pub mod session;

pub use logdelta_core_types::schema;

pub use errors::{ExError, ExErrorKind, LogDeltaError, Result};
