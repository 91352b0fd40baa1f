//! Domain models for loaded snapshots

pub mod row;
pub mod snapshot;

pub use row::Row;
pub use snapshot::{LoadStats, PushOutcome, Snapshot, SnapshotBuilder};
