//! Snapshot loader
//!
//! Reads a delimited text file with a header row into a [`Snapshot`] keyed by
//! one designated column.
//!
//! ## Record policy
//!
//! - Records are strict: a field count different from the header is
//!   `MalformedInput` and aborts the load. No partial snapshot is returned.
//! - A record with an empty key cell is skipped (debug-logged).
//! - A duplicate key overwrites the earlier record. The load continues and
//!   the collision is logged at warn with the `KeyCollision` code.
//!
//! ## Logging Ownership
//!
//! [`load_snapshot`] owns the start/end boundary events for a file load.

use crate::errors::{ExErrorKind, LogDeltaError, Result};
use crate::model::{PushOutcome, Snapshot, SnapshotBuilder};
use crate::{log_op_end, log_op_error, log_op_start};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_DELIMITER: u8 = b';';
pub const DEFAULT_KEY_COLUMN: &str = "id";

const BOM: char = '\u{feff}';

/// Parsing options for one load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Column whose value identifies a row
    pub key_column: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            key_column: DEFAULT_KEY_COLUMN.to_string(),
        }
    }
}

impl LoadOptions {
    pub fn new(delimiter: u8, key_column: impl Into<String>) -> Self {
        Self {
            delimiter,
            key_column: key_column.into(),
        }
    }

    /// Delimiter as a `char`, for rendering rows back out
    pub fn delimiter_char(&self) -> char {
        char::from(self.delimiter)
    }
}

/// Load a snapshot from a file
///
/// The file handle is held only for the duration of this call.
///
/// # Errors
///
/// - `SourceNotFound` - path missing, a directory, or cannot be opened
/// - `HeaderMissing` / `KeyColumnMissing` / `RecordShape` / `InvalidUtf8` /
///   `CsvSyntax` - the content does not match the expected shape
/// - `Io` - the read failed part-way
pub fn load_snapshot(path: &Path, options: &LoadOptions) -> Result<Snapshot> {
    let source = path.display().to_string();
    log_op_start!(
        "load_snapshot",
        source = %source,
        key_column = %options.key_column
    );
    let start = std::time::Instant::now();

    let snapshot = load_snapshot_impl(path, &source, options).map_err(|e| {
        log_op_error!(
            "load_snapshot",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            source = %source
        );
        e
    })?;

    log_op_end!(
        "load_snapshot",
        duration_ms = start.elapsed().as_millis() as u64,
        source = %source,
        rows = snapshot.len() as u64
    );

    Ok(snapshot)
}

fn load_snapshot_impl(path: &Path, source: &str, options: &LoadOptions) -> Result<Snapshot> {
    if path.is_dir() {
        return Err(LogDeltaError::SourceNotFound {
            path: source.to_string(),
            reason: "is a directory".to_string(),
        });
    }
    let file = File::open(path).map_err(|e| LogDeltaError::SourceNotFound {
        path: source.to_string(),
        reason: e.to_string(),
    })?;
    load_snapshot_from_reader(file, source, options)
}

/// Load a snapshot from any reader
///
/// `source` labels the input in errors and logs.
///
/// # Errors
///
/// Same shape errors as [`load_snapshot`]; `Io` if the reader fails.
pub fn load_snapshot_from_reader<R: Read>(
    reader: R,
    source: &str,
    options: &LoadOptions,
) -> Result<Snapshot> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let header: Vec<String> = rdr
        .headers()
        .map_err(|e| csv_error(source, e))?
        .iter()
        .enumerate()
        .map(|(i, column)| {
            if i == 0 {
                column.trim_start_matches(BOM).to_string()
            } else {
                column.to_string()
            }
        })
        .collect();

    if header.is_empty() {
        return Err(LogDeltaError::HeaderMissing {
            path: source.to_string(),
        });
    }

    let mut builder = SnapshotBuilder::new(options.key_column.as_str(), header).ok_or_else(|| {
        LogDeltaError::KeyColumnMissing {
            path: source.to_string(),
            key_column: options.key_column.clone(),
        }
    })?;
    let key_index = builder
        .header()
        .iter()
        .rposition(|c| *c == options.key_column)
        .unwrap_or_default();

    for record in rdr.records() {
        let record = record.map_err(|e| csv_error(source, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        match builder.push_record(record.iter()) {
            PushOutcome::Inserted => {}
            PushOutcome::SkippedEmptyKey => {
                tracing::debug!(source = %source, line, "skipping record with empty key");
            }
            PushOutcome::Replaced => {
                tracing::warn!(
                    source = %source,
                    line,
                    key = record.get(key_index).unwrap_or_default(),
                    err.code = ExErrorKind::KeyCollision.code(),
                    "duplicate key, later record wins"
                );
            }
        }
    }

    Ok(builder.finish())
}

fn csv_error(source: &str, err: csv::Error) -> LogDeltaError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => LogDeltaError::RecordShape {
            path: source.to_string(),
            line: pos.as_ref().map(|p| p.line()).unwrap_or_default(),
            expected: *expected_len as usize,
            found: *len as usize,
        },
        csv::ErrorKind::Utf8 { pos, .. } => LogDeltaError::InvalidUtf8 {
            path: source.to_string(),
            line: pos.as_ref().map(|p| p.line()).unwrap_or_default(),
        },
        csv::ErrorKind::Io(io) => LogDeltaError::Io {
            op: "read_snapshot".to_string(),
            path: source.to_string(),
            message: io.to_string(),
        },
        _ => LogDeltaError::CsvSyntax {
            path: source.to_string(),
            message: err.to_string(),
        },
    }
}
