//! Timestamp prefixing for undated files

use super::filename::{has_stamp_prefix, stamp_for};
use super::{list_files, utf8_name};
use crate::errors::{LogDeltaError, Result};
use crate::{log_op_end, log_op_error, log_op_start};
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one file during stamping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampOutcome {
    /// Name already starts with a stamp
    AlreadyDated { path: PathBuf },
    Renamed { from: PathBuf, to: PathBuf },
}

/// Prefix every undated regular file in `dir` with its modification time
///
/// The new name is `<YYYY-MM-DD_HH-MM>_<name>` in local time. If that name is
/// taken, `<stamp>_<n>_<name>` is used with the first free `n` from 1.
/// Subfolders are not entered.
///
/// # Errors
///
/// - `LogsDirNotFound` - `dir` missing or not a directory
/// - `Io` - reading metadata or renaming failed; files already renamed stay
///   renamed
pub fn stamp_undated_files(dir: &Path) -> Result<Vec<StampOutcome>> {
    let path = dir.display().to_string();
    log_op_start!("stamp_undated_files", path = %path);
    let start = std::time::Instant::now();

    let outcomes = stamp_undated_files_impl(dir).map_err(|e| {
        log_op_error!(
            "stamp_undated_files",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            path = %path
        );
        e
    })?;

    log_op_end!(
        "stamp_undated_files",
        duration_ms = start.elapsed().as_millis() as u64,
        path = %path
    );
    Ok(outcomes)
}

fn stamp_undated_files_impl(dir: &Path) -> Result<Vec<StampOutcome>> {
    let mut outcomes = Vec::new();

    for file in list_files(dir)? {
        let Some(name) = utf8_name(&file) else {
            tracing::warn!(path = %file.display(), "skipping file with non UTF-8 name");
            continue;
        };
        if has_stamp_prefix(name) {
            tracing::debug!(file = name, "already dated");
            outcomes.push(StampOutcome::AlreadyDated { path: file });
            continue;
        }

        let modified = fs::metadata(&file)
            .and_then(|m| m.modified())
            .map_err(|e| LogDeltaError::io("read_mtime", &file, &e))?;
        let target = free_stamped_name(dir, &stamp_for(modified), name);

        fs::rename(&file, &target).map_err(|e| LogDeltaError::io("rename", &file, &e))?;
        tracing::info!(from = %file.display(), to = %target.display(), "stamped file");
        outcomes.push(StampOutcome::Renamed {
            from: file,
            to: target,
        });
    }

    Ok(outcomes)
}

fn free_stamped_name(dir: &Path, stamp: &str, name: &str) -> PathBuf {
    let mut target = dir.join(format!("{}_{}", stamp, name));
    let mut counter = 1;
    while target.exists() {
        target = dir.join(format!("{}_{}_{}", stamp, counter, name));
        counter += 1;
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_stamped_name_counts_up() {
        let tmp = tempfile::tempdir().unwrap();
        let stamp = "2024-03-01_09-30";
        assert_eq!(
            free_stamped_name(tmp.path(), stamp, "a.csv"),
            tmp.path().join("2024-03-01_09-30_a.csv")
        );

        fs::write(tmp.path().join("2024-03-01_09-30_a.csv"), "").unwrap();
        fs::write(tmp.path().join("2024-03-01_09-30_1_a.csv"), "").unwrap();
        assert_eq!(
            free_stamped_name(tmp.path(), stamp, "a.csv"),
            tmp.path().join("2024-03-01_09-30_2_a.csv")
        );
    }

    #[test]
    fn test_stamp_renames_undated_and_skips_dated() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("digital.csv"), "id\n").unwrap();
        fs::write(tmp.path().join("2024-01-01_00-00_analog.csv"), "id\n").unwrap();

        let outcomes = stamp_undated_files(tmp.path()).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.contains(&StampOutcome::AlreadyDated {
            path: tmp.path().join("2024-01-01_00-00_analog.csv")
        }));

        let renamed = outcomes
            .iter()
            .find_map(|o| match o {
                StampOutcome::Renamed { to, .. } => Some(to.clone()),
                _ => None,
            })
            .unwrap();
        let name = renamed.file_name().unwrap().to_str().unwrap();
        assert!(has_stamp_prefix(name));
        assert!(name.ends_with("_digital.csv"));
        assert!(!tmp.path().join("digital.csv").exists());
    }

    #[test]
    fn test_stamp_leaves_subfolders_alone() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("digital")).unwrap();
        fs::write(tmp.path().join("digital").join("inner.csv"), "").unwrap();

        assert!(stamp_undated_files(tmp.path()).unwrap().is_empty());
        assert!(tmp.path().join("digital").join("inner.csv").exists());
    }
}
