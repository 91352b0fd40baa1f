//! Organize command

use logdelta_core::config::Config;
use logdelta_core::housekeeping::{tidy_logs_dir, MoveOutcome, StampOutcome, TidyReport};
use std::io::{self, Write};

pub fn execute(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let report = tidy_logs_dir(&config.logs_dir)?;
    let mut out = io::stdout().lock();
    print_tidy_report(&report, &mut out)?;
    Ok(())
}

/// One line per stamping or moving action
pub fn print_tidy_report<W: Write>(report: &TidyReport, out: &mut W) -> io::Result<()> {
    for outcome in &report.stamped {
        match outcome {
            StampOutcome::AlreadyDated { path } => {
                writeln!(out, "Skipping (already dated): {}", file_name(path))?;
            }
            StampOutcome::Renamed { from, to } => {
                writeln!(out, "Renaming '{}' -> '{}'", file_name(from), file_name(to))?;
            }
        }
    }
    for outcome in &report.moved {
        match outcome {
            MoveOutcome::Moved { from, to, .. } => {
                writeln!(out, "Moving '{}' -> '{}'", file_name(from), to.display())?;
            }
            MoveOutcome::Failed { from, to, reason } => {
                writeln!(
                    out,
                    "Failed to move '{}' to '{}': {}",
                    file_name(from),
                    to.display(),
                    reason
                )?;
            }
        }
    }
    Ok(())
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
