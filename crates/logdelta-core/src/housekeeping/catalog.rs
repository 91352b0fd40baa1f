//! Catalog of organized log versions

use super::filename::parse_log_filename;
use super::{list_dirs, list_files, utf8_name};
use crate::errors::Result;
use crate::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One dated file of a log type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogVersion {
    /// `YYYY-MM-DD_HH-MM` taken from the file name
    pub stamp: String,
    pub path: PathBuf,
}

impl LogVersion {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Log types found under a logs directory, each with its versions
///
/// Log types iterate in name order. Versions are newest first; equal stamps
/// are ordered by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    types: BTreeMap<String, Vec<LogVersion>>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn log_types(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Log type at a zero-based menu position
    pub fn log_type_at(&self, index: usize) -> Option<&str> {
        self.log_types().nth(index)
    }

    pub fn versions(&self, log_type: &str) -> Option<&[LogVersion]> {
        self.types.get(log_type).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[LogVersion])> {
        self.types.iter().map(|(t, v)| (t.as_str(), v.as_slice()))
    }

    fn insert(&mut self, log_type: String, mut versions: Vec<LogVersion>) {
        if versions.is_empty() {
            return;
        }
        versions.sort_by(|a, b| {
            b.stamp
                .cmp(&a.stamp)
                .then_with(|| a.path.file_name().cmp(&b.path.file_name()))
        });
        self.types.insert(log_type, versions);
    }
}

/// Read the organized tree under `dir`
///
/// Every subfolder is a log type. Its dated `.csv` files become versions;
/// undated files and nested folders are ignored, and a subfolder with no
/// dated file is left out.
///
/// # Errors
///
/// - `LogsDirNotFound` - `dir` missing or not a directory
/// - `Io` - a folder could not be listed
pub fn scan_catalog(dir: &Path) -> Result<Catalog> {
    let path = dir.display().to_string();
    log_op_start!("scan_catalog", path = %path);
    let start = std::time::Instant::now();

    let catalog = scan_catalog_impl(dir).map_err(|e| {
        log_op_error!(
            "scan_catalog",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            path = %path
        );
        e
    })?;

    log_op_end!(
        "scan_catalog",
        duration_ms = start.elapsed().as_millis() as u64,
        path = %path,
        log_types = catalog.len() as u64
    );
    Ok(catalog)
}

fn scan_catalog_impl(dir: &Path) -> Result<Catalog> {
    let mut catalog = Catalog::default();

    for folder in list_dirs(dir)? {
        let Some(log_type) = utf8_name(&folder) else {
            tracing::warn!(path = %folder.display(), "skipping folder with non UTF-8 name");
            continue;
        };

        let versions = list_files(&folder)?
            .into_iter()
            .filter_map(|file| {
                let parsed = utf8_name(&file).and_then(parse_log_filename)?;
                Some(LogVersion {
                    stamp: parsed.stamp,
                    path: file,
                })
            })
            .collect();
        catalog.insert(log_type.to_string(), versions);
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LogDeltaError;
    use std::fs;

    fn touch(path: PathBuf) {
        fs::write(path, "id\n").unwrap();
    }

    #[test]
    fn test_versions_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        let digital = tmp.path().join("digital");
        fs::create_dir(&digital).unwrap();
        touch(digital.join("2024-01-01_08-00_digital.csv"));
        touch(digital.join("2024-03-01_08-00_digital.csv"));
        touch(digital.join("2024-02-01_08-00_digital.csv"));

        let catalog = scan_catalog(tmp.path()).unwrap();
        let stamps: Vec<&str> = catalog
            .versions("digital")
            .unwrap()
            .iter()
            .map(|v| v.stamp.as_str())
            .collect();
        assert_eq!(
            stamps,
            vec!["2024-03-01_08-00", "2024-02-01_08-00", "2024-01-01_08-00"]
        );
    }

    #[test]
    fn test_equal_stamps_order_by_file_name() {
        let tmp = tempfile::tempdir().unwrap();
        let digital = tmp.path().join("digital");
        fs::create_dir(&digital).unwrap();
        touch(digital.join("2024-01-01_08-00_digital_1.csv"));
        touch(digital.join("2024-01-01_08-00_digital.csv"));

        let catalog = scan_catalog(tmp.path()).unwrap();
        let names: Vec<String> = catalog
            .versions("digital")
            .unwrap()
            .iter()
            .map(LogVersion::file_name)
            .collect();
        assert_eq!(
            names,
            vec!["2024-01-01_08-00_digital.csv", "2024-01-01_08-00_digital_1.csv"]
        );
    }

    #[test]
    fn test_types_sorted_and_empty_types_omitted() {
        let tmp = tempfile::tempdir().unwrap();
        for folder in ["zeta", "alpha", "empty"] {
            fs::create_dir(tmp.path().join(folder)).unwrap();
        }
        touch(tmp.path().join("zeta").join("2024-01-01_08-00_zeta.csv"));
        touch(tmp.path().join("alpha").join("2024-01-01_08-00_alpha.csv"));
        touch(tmp.path().join("empty").join("notes.csv"));
        touch(tmp.path().join("2024-01-01_08-00_loose.csv"));

        let catalog = scan_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.log_types().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
        assert_eq!(catalog.log_type_at(1), Some("zeta"));
        assert_eq!(catalog.log_type_at(2), None);
    }

    #[test]
    fn test_missing_logs_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let err = scan_catalog(&tmp.path().join("logs")).unwrap_err();
        assert!(matches!(err, LogDeltaError::LogsDirNotFound { .. }));
    }
}
