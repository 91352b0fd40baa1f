//! Tool configuration
//!
//! Values come from, in increasing precedence: built-in defaults, a
//! `logdelta.toml` file, and command-line flags.
//!
//! ```toml
//! logs_dir = "logs"
//! delimiter = ";"
//! key_column = "id"
//! log_profile = "production"
//! ```

use crate::errors::{LogDeltaError, Result};
use crate::loader::{LoadOptions, DEFAULT_KEY_COLUMN};
use crate::logging_facility::Profile;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory by [`Config::discover`]
pub const CONFIG_FILE_NAME: &str = "logdelta.toml";

const DEFAULT_LOGS_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root of the per log type folders
    pub logs_dir: PathBuf,
    pub delimiter: char,
    pub key_column: String,
    pub log_profile: Profile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            delimiter: ';',
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            log_profile: Profile::Development,
        }
    }
}

impl Config {
    /// Read a TOML config file; missing keys take their defaults
    ///
    /// # Errors
    ///
    /// - `SourceNotFound` - the file cannot be read
    /// - `InvalidConfig` - the content is not valid config TOML
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LogDeltaError::SourceNotFound {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content, path)
    }

    /// [`CONFIG_FILE_NAME`] from the working directory, or defaults if absent
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists.
    pub fn discover() -> Result<Self> {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| LogDeltaError::InvalidConfig {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Loader options for this configuration
    ///
    /// # Errors
    ///
    /// `InvalidDelimiter` if the delimiter is not a single ASCII character, or is
    /// the quote character or a line break.
    pub fn load_options(&self) -> Result<LoadOptions> {
        let delimiter = delimiter_byte(self.delimiter)?;
        Ok(LoadOptions::new(delimiter, self.key_column.clone()))
    }
}

/// Parse a delimiter given as text, e.g. from a command-line flag
///
/// # Errors
///
/// `InvalidDelimiter` unless `value` is exactly one ASCII character other
/// than the quote character or a line break.
pub fn parse_delimiter(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && !RESERVED_DELIMITERS.contains(&c) => Ok(c),
        _ => Err(LogDeltaError::InvalidDelimiter {
            value: value.to_string(),
        }),
    }
}

/// Bytes the CSV reader already gives a meaning to
const RESERVED_DELIMITERS: [char; 3] = ['"', '\n', '\r'];

fn delimiter_byte(c: char) -> Result<u8> {
    u8::try_from(c)
        .ok()
        .filter(|b| b.is_ascii() && !RESERVED_DELIMITERS.contains(&char::from(*b)))
        .ok_or_else(|| LogDeltaError::InvalidDelimiter {
            value: c.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.logs_dir, PathBuf::from("logs"));
        assert_eq!(config.load_options().unwrap(), LoadOptions::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("key_column = \"code\"\n", Path::new("x.toml")).unwrap();
        assert_eq!(config.key_column, "code");
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.log_profile, Profile::Development);
    }

    #[test]
    fn test_full_file() {
        let content = "logs_dir = \"data\"\ndelimiter = \",\"\nkey_column = \"code\"\nlog_profile = \"production\"\n";
        let config = Config::from_toml(content, Path::new("x.toml")).unwrap();
        assert_eq!(config.logs_dir, PathBuf::from("data"));
        assert_eq!(config.log_profile, Profile::Production);
        assert_eq!(config.load_options().unwrap(), LoadOptions::new(b',', "code"));
    }

    #[test]
    fn test_unknown_key_is_invalid_config() {
        let err = Config::from_toml("colour = \"red\"\n", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, LogDeltaError::InvalidConfig { .. }));
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let config = Config {
            delimiter: '§',
            ..Config::default()
        };
        let err = config.load_options().unwrap_err();
        assert!(matches!(err, LogDeltaError::InvalidDelimiter { .. }));
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("\t").unwrap(), '\t');
        assert_eq!(parse_delimiter(",").unwrap(), ',');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("§").is_err());
    }

    #[test]
    fn test_quote_and_line_breaks_rejected_as_delimiter() {
        for value in ["\"", "\n", "\r"] {
            let err = parse_delimiter(value).unwrap_err();
            assert!(matches!(err, LogDeltaError::InvalidDelimiter { .. }));
        }
        let config = Config {
            delimiter: '"',
            ..Config::default()
        };
        assert!(matches!(
            config.load_options().unwrap_err(),
            LogDeltaError::InvalidDelimiter { .. }
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Config::load(&tmp.path().join("logdelta.toml")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }
}
