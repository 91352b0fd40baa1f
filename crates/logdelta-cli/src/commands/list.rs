//! List command

use logdelta_core::config::Config;
use logdelta_core::housekeeping::{scan_catalog, Catalog};
use std::io::{self, Write};

pub const NO_LOGS_MESSAGE: &str = "No log files found in logs subfolders.";

pub fn execute(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = scan_catalog(&config.logs_dir)?;
    let mut out = io::stdout().lock();
    print_catalog(&catalog, &mut out)?;
    Ok(())
}

fn print_catalog<W: Write>(catalog: &Catalog, out: &mut W) -> io::Result<()> {
    if catalog.is_empty() {
        return writeln!(out, "{}", NO_LOGS_MESSAGE);
    }
    for (log_type, versions) in catalog.iter() {
        writeln!(out, "{} ({} versions)", log_type, versions.len())?;
        for version in versions {
            writeln!(out, "  {}  {}", version.stamp, version.path.display())?;
        }
    }
    Ok(())
}
