//! Compare command

use clap::{Args, ValueEnum};
use logdelta_core::config::Config;
use logdelta_core::diff::{compute_diff, render_json, render_report};
use logdelta_core::loader::load_snapshot;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Older version
    #[arg(long)]
    pub old: PathBuf,

    /// Newer version
    #[arg(long)]
    pub new: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn execute(args: CompareArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let options = config.load_options()?;
    let old = load_snapshot(&args.old, &options)?;
    let new = load_snapshot(&args.new, &options)?;
    let diff = compute_diff(&old, &new);

    match args.format {
        OutputFormat::Text => {
            print!(
                "{}",
                render_report(&diff, &old, &new, options.delimiter_char())
            );
        }
        OutputFormat::Json => println!("{}", render_json(&diff, &old)?),
    }

    Ok(())
}
