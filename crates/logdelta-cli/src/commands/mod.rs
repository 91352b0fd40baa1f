//! Subcommands and the settings shared by all of them

pub mod compare;
pub mod interactive;
pub mod list;
pub mod organize;

use clap::{Args, ValueEnum};
use logdelta_core::config::{parse_delimiter, Config};
use logdelta_core::logging_facility::Profile;
use std::path::PathBuf;

/// Flags that override the config file
#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Config file (default: ./logdelta.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub logs_dir: Option<PathBuf>,

    /// Single ASCII field delimiter
    #[arg(long, global = true)]
    pub delimiter: Option<String>,

    /// Key column name
    #[arg(long, global = true)]
    pub key: Option<String>,

    #[arg(long, global = true, value_enum)]
    pub log_profile: Option<LogProfileArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogProfileArg {
    Development,
    Production,
}

impl From<LogProfileArg> for Profile {
    fn from(arg: LogProfileArg) -> Self {
        match arg {
            LogProfileArg::Development => Profile::Development,
            LogProfileArg::Production => Profile::Production,
        }
    }
}

impl SettingsArgs {
    /// Config file values with these flags applied on top
    pub fn resolve(&self) -> logdelta_core::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::discover()?,
        };

        if let Some(logs_dir) = &self.logs_dir {
            config.logs_dir = logs_dir.clone();
        }
        if let Some(delimiter) = &self.delimiter {
            config.delimiter = parse_delimiter(delimiter)?;
        }
        if let Some(key) = &self.key {
            config.key_column = key.clone();
        }
        if let Some(profile) = self.log_profile {
            config.log_profile = profile.into();
        }
        Ok(config)
    }
}
