//! Logs directory housekeeping
//!
//! The logs directory holds one subfolder per log type, each containing
//! versions named `YYYY-MM-DD_HH-MM_<logtype>.csv`. Files dropped into the
//! top level are brought into that shape in two passes:
//!
//! 1. [`stamp_undated_files`] prefixes undated files with their modification
//!    time.
//! 2. [`organize_by_log_type`] moves dated `.csv` files into their log type
//!    folder.
//!
//! [`scan_catalog`] then reads the organized tree back.
//!
//! ## Logging Ownership
//!
//! [`tidy_logs_dir`], [`stamp_undated_files`], [`organize_by_log_type`] and
//! [`scan_catalog`] each own their start/end boundary events.

pub mod catalog;
pub mod filename;
pub mod organize;
pub mod stamp;

pub use catalog::{scan_catalog, Catalog, LogVersion};
pub use filename::{has_stamp_prefix, parse_log_filename, LogFileName};
pub use organize::{organize_by_log_type, MoveOutcome};
pub use stamp::{stamp_undated_files, StampOutcome};

use crate::errors::{LogDeltaError, Result};
use crate::{log_op_end, log_op_error, log_op_start};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything one housekeeping run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TidyReport {
    pub stamped: Vec<StampOutcome>,
    pub moved: Vec<MoveOutcome>,
}

/// Stamp, then organize, the top level of `dir`
///
/// # Errors
///
/// - `LogsDirNotFound` - `dir` missing or not a directory
/// - `Io` - listing, renaming or creating a folder failed
pub fn tidy_logs_dir(dir: &Path) -> Result<TidyReport> {
    let path = dir.display().to_string();
    log_op_start!("tidy_logs_dir", path = %path);
    let start = std::time::Instant::now();

    let result = stamp_undated_files(dir).and_then(|stamped| {
        let moved = organize_by_log_type(dir)?;
        Ok(TidyReport { stamped, moved })
    });
    let report = result.map_err(|e| {
        log_op_error!(
            "tidy_logs_dir",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            path = %path
        );
        e
    })?;

    log_op_end!(
        "tidy_logs_dir",
        duration_ms = start.elapsed().as_millis() as u64,
        path = %path
    );
    Ok(report)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(LogDeltaError::LogsDirNotFound {
            path: dir.display().to_string(),
        })
    }
}

/// Regular files directly under `dir`, sorted by name
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    list_entries(dir, |p| p.is_file())
}

/// Subfolders directly under `dir`, sorted by name
fn list_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    list_entries(dir, |p| p.is_dir())
}

fn list_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;
    let entries = fs::read_dir(dir).map_err(|e| LogDeltaError::io("read_dir", dir, &e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LogDeltaError::io("read_dir", dir, &e))?;
        let path = entry.path();
        if keep(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// UTF-8 file name of `path`, `None` for names that are not valid UTF-8
fn utf8_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
