//! Structured logging for logdelta
//!
//! - [`init`] installs the process-wide subscriber once, per [`Profile`]
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` emit boundary events
//!   with the field names in [`crate::schema`]
//! - [`test_capture`] collects events in memory for assertions
//!
//! ```rust
//! use logdelta_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Boundary operations (load, compare, stamp, organize, scan) own their
//! start/end events. Helpers below them log detail with plain
//! `tracing::debug!` or `tracing::warn!`.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
