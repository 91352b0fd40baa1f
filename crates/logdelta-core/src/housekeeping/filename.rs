//! Log filename convention: `YYYY-MM-DD_HH-MM_<logtype>.csv`

use std::sync::OnceLock;
use std::time::SystemTime;

/// `chrono` format of the timestamp prefix
pub const STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M";

static LOG_NAME_REGEX: OnceLock<regex::Regex> = OnceLock::new();
static STAMP_PREFIX_REGEX: OnceLock<regex::Regex> = OnceLock::new();

fn log_name_regex() -> &'static regex::Regex {
    LOG_NAME_REGEX.get_or_init(|| {
        regex::Regex::new(r"^(\d{4}-\d{2}-\d{2}_\d{2}-\d{2})_(.+)\.csv$")
            .expect("Invalid regex pattern - this is a compile-time constant")
    })
}

fn stamp_prefix_regex() -> &'static regex::Regex {
    STAMP_PREFIX_REGEX.get_or_init(|| {
        regex::Regex::new(r"^\d{4}-\d{2}-\d{2}_\d{2}-\d{2}_")
            .expect("Invalid regex pattern - this is a compile-time constant")
    })
}

/// Parts of a conventionally named log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileName {
    /// `YYYY-MM-DD_HH-MM`; sorts chronologically as a string
    pub stamp: String,
    /// Everything between the stamp and the `.csv` extension
    pub log_type: String,
}

/// Split a file name into stamp and log type.
///
/// Returns `None` for names that do not follow the convention.
pub fn parse_log_filename(name: &str) -> Option<LogFileName> {
    let caps = log_name_regex().captures(name)?;
    Some(LogFileName {
        stamp: caps.get(1)?.as_str().to_string(),
        log_type: caps.get(2)?.as_str().to_string(),
    })
}

/// True if `name` already starts with a `YYYY-MM-DD_HH-MM_` prefix
pub fn has_stamp_prefix(name: &str) -> bool {
    stamp_prefix_regex().is_match(name)
}

/// Format a modification time as a stamp in local time
pub fn stamp_for(time: SystemTime) -> String {
    chrono::DateTime::<chrono::Local>::from(time)
        .format(STAMP_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conventional_name() {
        let parsed = parse_log_filename("2024-03-01_09-30_digital.csv").unwrap();
        assert_eq!(parsed.stamp, "2024-03-01_09-30");
        assert_eq!(parsed.log_type, "digital");
    }

    #[test]
    fn test_parse_log_type_may_contain_underscores() {
        let parsed = parse_log_filename("2024-03-01_09-30_door_access_1.csv").unwrap();
        assert_eq!(parsed.log_type, "door_access_1");
    }

    #[test]
    fn test_parse_rejects_unconventional_names() {
        assert!(parse_log_filename("digital.csv").is_none());
        assert!(parse_log_filename("2024-03-01_digital.csv").is_none());
        assert!(parse_log_filename("2024-03-01_09-30_digital.txt").is_none());
        assert!(parse_log_filename("2024-03-01_09-30_.csv").is_none());
    }

    #[test]
    fn test_stamp_prefix_detection() {
        assert!(has_stamp_prefix("2024-03-01_09-30_notes.txt"));
        assert!(!has_stamp_prefix("notes_2024-03-01_09-30.txt"));
        assert!(!has_stamp_prefix("2024-03-01-09-30_notes.txt"));
    }

    #[test]
    fn test_stamp_for_has_prefix_shape() {
        let stamp = stamp_for(SystemTime::now());
        assert!(has_stamp_prefix(&format!("{}_x", stamp)));
        assert_eq!(stamp.len(), "2024-03-01_09-30".len());
    }
}
