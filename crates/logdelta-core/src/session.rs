//! Comparison session
//!
//! A [`CompareSession`] holds everything one comparison request needs: the
//! catalog it was opened on and the log type and versions picked from it.
//! Repeated comparisons open a fresh session.
//!
//! Menu input is validated by [`parse_choice`], which returns an
//! [`InvalidChoice`] rather than a [`LogDeltaError`]: a bad menu entry is
//! something to re-prompt on, not a failure of the tool.

use crate::diff::{compute_diff, render_report, SnapshotDiff};
use crate::errors::{LogDeltaError, Result};
use crate::housekeeping::{scan_catalog, tidy_logs_dir, Catalog, LogVersion, TidyReport};
use crate::loader::{load_snapshot, LoadOptions};
use crate::model::Snapshot;
use crate::{log_op_end, log_op_error, log_op_start};
use std::num::{IntErrorKind, ParseIntError};
use std::path::Path;
use thiserror::Error;

/// Rejected menu input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidChoice {
    #[error("'{input}' is not a number")]
    NotANumber { input: String },

    #[error("{choice} is not between 1 and {len}")]
    OutOfRange { choice: String, len: usize },

    /// Versions requested before a log type was chosen
    #[error("no log type selected")]
    NoLogType,
}

/// Validate 1-based menu input against a list of `len` entries
///
/// Surrounding whitespace is ignored. Returns the zero-based index.
pub fn parse_choice(input: &str, len: usize) -> std::result::Result<usize, InvalidChoice> {
    let trimmed = input.trim();
    let out_of_range = || InvalidChoice::OutOfRange {
        choice: trimmed.to_string(),
        len,
    };
    let choice: i64 = trimmed.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(),
        _ => InvalidChoice::NotANumber {
            input: trimmed.to_string(),
        },
    })?;
    match usize::try_from(choice) {
        Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
        _ => Err(out_of_range()),
    }
}

/// Two loaded snapshots and their diff
#[derive(Debug, Clone)]
pub struct Comparison {
    pub old_version: LogVersion,
    pub new_version: LogVersion,
    pub old: Snapshot,
    pub new: Snapshot,
    pub diff: SnapshotDiff,
}

impl Comparison {
    /// Console report, rows joined with `delimiter`
    pub fn report(&self, delimiter: char) -> String {
        render_report(&self.diff, &self.old, &self.new, delimiter)
    }
}

/// Selection state for one comparison
#[derive(Debug, Clone)]
pub struct CompareSession {
    catalog: Catalog,
    log_type: Option<String>,
    old: Option<LogVersion>,
    new: Option<LogVersion>,
}

impl CompareSession {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            log_type: None,
            old: None,
            new: None,
        }
    }

    /// Tidy `logs_dir` and open a session on the resulting catalog
    ///
    /// # Errors
    ///
    /// Any error from [`tidy_logs_dir`] or [`scan_catalog`].
    pub fn open(logs_dir: &Path) -> Result<(Self, TidyReport)> {
        let tidy = tidy_logs_dir(logs_dir)?;
        let catalog = scan_catalog(logs_dir)?;
        Ok((Self::new(catalog), tidy))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn log_type(&self) -> Option<&str> {
        self.log_type.as_deref()
    }

    /// Versions of the selected log type, empty before a selection
    pub fn versions(&self) -> &[LogVersion] {
        self.log_type
            .as_deref()
            .and_then(|t| self.catalog.versions(t))
            .unwrap_or_default()
    }

    /// Pick a log type by 1-based menu input
    ///
    /// Clears any previously chosen versions.
    pub fn select_log_type(&mut self, input: &str) -> std::result::Result<&str, InvalidChoice> {
        let index = parse_choice(input, self.catalog.len())?;
        let log_type = self
            .catalog
            .log_type_at(index)
            .map(str::to_string)
            .ok_or_else(|| InvalidChoice::OutOfRange {
                choice: (index + 1).to_string(),
                len: self.catalog.len(),
            })?;
        self.old = None;
        self.new = None;
        Ok(self.log_type.insert(log_type).as_str())
    }

    /// Pick the OLD and NEW versions by 1-based menu input
    ///
    /// Both are validated before either is stored. Picking the same version
    /// twice is allowed.
    pub fn select_versions(
        &mut self,
        old_input: &str,
        new_input: &str,
    ) -> std::result::Result<(&LogVersion, &LogVersion), InvalidChoice> {
        if self.log_type.is_none() {
            return Err(InvalidChoice::NoLogType);
        }
        let versions = self.versions();
        let old_index = parse_choice(old_input, versions.len())?;
        let new_index = parse_choice(new_input, versions.len())?;
        let old = versions[old_index].clone();
        let new = versions[new_index].clone();

        let old = &*self.old.insert(old);
        let new = &*self.new.insert(new);
        Ok((old, new))
    }

    /// Load both selected versions and diff them
    ///
    /// # Errors
    ///
    /// - `NothingSelected` - versions have not been chosen
    /// - any load error from either file; no comparison is produced
    pub fn compare(&self, options: &LoadOptions) -> Result<Comparison> {
        let (Some(old_version), Some(new_version)) = (&self.old, &self.new) else {
            return Err(LogDeltaError::NothingSelected {
                what: "versions".to_string(),
            });
        };
        compare_versions(old_version, new_version, options)
    }
}

/// Load two versions and diff them
///
/// # Errors
///
/// Any load error from either file.
pub fn compare_versions(
    old_version: &LogVersion,
    new_version: &LogVersion,
    options: &LoadOptions,
) -> Result<Comparison> {
    log_op_start!(
        "compare",
        old = %old_version.path.display(),
        new = %new_version.path.display()
    );
    let start = std::time::Instant::now();

    let comparison = compare_versions_impl(old_version, new_version, options).map_err(|e| {
        log_op_error!(
            "compare",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "compare",
        duration_ms = start.elapsed().as_millis() as u64,
        added = comparison.diff.added.len() as u64,
        removed = comparison.diff.removed.len() as u64,
        changed = comparison.diff.changed.len() as u64
    );
    Ok(comparison)
}

fn compare_versions_impl(
    old_version: &LogVersion,
    new_version: &LogVersion,
    options: &LoadOptions,
) -> Result<Comparison> {
    let old = load_snapshot(&old_version.path, options)?;
    let new = load_snapshot(&new_version.path, options)?;
    let diff = compute_diff(&old, &new);
    Ok(Comparison {
        old_version: old_version.clone(),
        new_version: new_version.clone(),
        old,
        new,
        diff,
    })
}
