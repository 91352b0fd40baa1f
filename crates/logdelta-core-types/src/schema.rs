//! Field names and event names shared by every logdelta log line
//!
//! Boundary events always carry [`FIELD_COMPONENT`], [`FIELD_OP`] and
//! [`FIELD_EVENT`]; end events add [`FIELD_DURATION_MS`].

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Inputs
pub const FIELD_SOURCE: &str = "source";
pub const FIELD_PATH: &str = "path";
pub const FIELD_KEY_COLUMN: &str = "key_column";
pub const FIELD_KEY: &str = "key";
pub const FIELD_LOG_TYPE: &str = "log_type";

// Counts
pub const FIELD_ROWS: &str = "rows";
pub const FIELD_ADDED: &str = "added";
pub const FIELD_REMOVED: &str = "removed";
pub const FIELD_CHANGED: &str = "changed";

// Present on `end_error` events and on key collision warnings
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_field_names_are_unique() {
        let fields = [
            FIELD_COMPONENT,
            FIELD_OP,
            FIELD_EVENT,
            FIELD_DURATION_MS,
            FIELD_SOURCE,
            FIELD_PATH,
            FIELD_KEY_COLUMN,
            FIELD_KEY,
            FIELD_LOG_TYPE,
            FIELD_ROWS,
            FIELD_ADDED,
            FIELD_REMOVED,
            FIELD_CHANGED,
            FIELD_ERR_KIND,
            FIELD_ERR_CODE,
        ];
        let unique: BTreeSet<&str> = fields.iter().copied().collect();
        assert_eq!(unique.len(), fields.len());
    }

    #[test]
    fn test_event_names_are_distinct() {
        let events: BTreeSet<&str> = [EVENT_START, EVENT_END, EVENT_END_ERROR].into();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_error_fields_are_namespaced() {
        assert!(FIELD_ERR_KIND.starts_with("err."));
        assert!(FIELD_ERR_CODE.starts_with("err."));
    }
}
