//! Sorting dated files into per log type folders

use super::filename::parse_log_filename;
use super::{list_files, utf8_name};
use crate::errors::{LogDeltaError, Result};
use crate::{log_op_end, log_op_error, log_op_start};
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one dated `.csv` file during organizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved {
        from: PathBuf,
        to: PathBuf,
        log_type: String,
    },
    /// The rename failed; the file is left where it was
    Failed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },
}

/// Move every conventionally named `.csv` file in `dir` into `dir/<log_type>/`
///
/// The extension check ignores case. Files that do not parse are left in
/// place. If the target name is taken, `<stem>_<n>.<ext>` is used with the
/// first free `n` from 1. A failed move is logged and reported as
/// [`MoveOutcome::Failed`]; the remaining files are still processed.
///
/// # Errors
///
/// - `LogsDirNotFound` - `dir` missing or not a directory
/// - `Io` - listing `dir` or creating a log type folder failed
pub fn organize_by_log_type(dir: &Path) -> Result<Vec<MoveOutcome>> {
    let path = dir.display().to_string();
    log_op_start!("organize_by_log_type", path = %path);
    let start = std::time::Instant::now();

    let outcomes = organize_by_log_type_impl(dir).map_err(|e| {
        log_op_error!(
            "organize_by_log_type",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            path = %path
        );
        e
    })?;

    log_op_end!(
        "organize_by_log_type",
        duration_ms = start.elapsed().as_millis() as u64,
        path = %path,
        moved = outcomes
            .iter()
            .filter(|o| matches!(o, MoveOutcome::Moved { .. }))
            .count() as u64
    );
    Ok(outcomes)
}

fn organize_by_log_type_impl(dir: &Path) -> Result<Vec<MoveOutcome>> {
    let mut outcomes = Vec::new();

    for file in list_files(dir)? {
        if !has_csv_extension(&file) {
            continue;
        }
        let Some(parsed) = utf8_name(&file).and_then(parse_log_filename) else {
            continue;
        };
        if parsed.log_type == "." || parsed.log_type == ".." {
            tracing::warn!(file = %file.display(), "log type is not a usable folder name");
            continue;
        }

        let target_dir = dir.join(&parsed.log_type);
        fs::create_dir_all(&target_dir)
            .map_err(|e| LogDeltaError::io("create_dir", &target_dir, &e))?;
        let target = free_target_name(&target_dir, &file);

        match fs::rename(&file, &target) {
            Ok(()) => {
                tracing::info!(
                    from = %file.display(),
                    to = %target.display(),
                    log_type = %parsed.log_type,
                    "moved file"
                );
                outcomes.push(MoveOutcome::Moved {
                    from: file,
                    to: target,
                    log_type: parsed.log_type,
                });
            }
            Err(e) => {
                tracing::warn!(
                    from = %file.display(),
                    to = %target.display(),
                    error = %e,
                    "failed to move file"
                );
                outcomes.push(MoveOutcome::Failed {
                    from: file,
                    to: target,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(outcomes)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

fn free_target_name(target_dir: &Path, file: &Path) -> PathBuf {
    let Some(name) = file.file_name() else {
        return target_dir.to_path_buf();
    };
    let mut target = target_dir.join(name);

    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = file
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1;
    while target.exists() {
        target = target_dir.join(format!("{}_{}{}", stem, counter, suffix));
        counter += 1;
    }
    target
}
