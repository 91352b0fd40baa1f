//! logdelta CLI
//!
//! Command-line interface for logdelta

use clap::{Parser, Subcommand};
use logdelta_core::logging_facility;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "logdelta")]
#[command(about = "logdelta - Compare timestamped versions of CSV logs", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: commands::SettingsArgs,

    /// Defaults to `interactive`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Stamp undated files and sort them into log type folders
    Organize,
    /// List log types and their versions
    List,
    /// Compare two files directly
    Compare(commands::compare::CompareArgs),
    /// Menu-driven comparison of cataloged versions
    Interactive,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.settings.resolve()?;
    logging_facility::init(config.log_profile);
    tracing::debug!(?config, "resolved configuration");

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Organize => commands::organize::execute(&config),
        Commands::List => commands::list::execute(&config),
        Commands::Compare(args) => commands::compare::execute(args, &config),
        Commands::Interactive => commands::interactive::execute(&config),
    }
}
