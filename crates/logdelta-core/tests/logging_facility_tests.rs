#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::write_file;
use logdelta_core::errors::LogDeltaError;
use logdelta_core::housekeeping::scan_catalog;
use logdelta_core::loader::{load_snapshot, LoadOptions};
use logdelta_core::logging_facility::test_capture::init_test_capture;
use logdelta_core::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_KEY,
    FIELD_PATH, FIELD_ROWS, FIELD_SOURCE,
};
use logdelta_core::{log_op_end, log_op_error, log_op_start};
use tracing::Level;

#[test]
fn test_log_op_start_and_end_macros() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_end_unique_1";

    log_op_start!(op_name, source = "a.csv");
    log_op_end!(op_name, duration_ms = 42);

    capture.assert_event_exists(op_name, EVENT_START);
    let events = capture.events_for_op(op_name);
    let end = events
        .iter()
        .find(|e| e.event() == Some(EVENT_END))
        .expect("Should have end event");
    assert_eq!(end.field(FIELD_DURATION_MS), Some("42"));
    assert_eq!(events[0].field(FIELD_SOURCE), Some("a.csv"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_2";

    let err = LogDeltaError::KeyColumnMissing {
        path: "a.csv".to_string(),
        key_column: "id".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 3);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::ERROR);
    assert_eq!(events[0].event(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_MALFORMED_INPUT"));
}

// S1: a successful load owns exactly one start and one end
#[test]
fn test_load_snapshot_boundary_events() {
    let capture = init_test_capture();
    let tmp = tempfile::tempdir().unwrap();
    let path = write_file(tmp.path(), "boundary_ok.csv", "id;v\n1;a\n2;b\n");
    let source = path.display().to_string();

    load_snapshot(&path, &LoadOptions::default()).unwrap();

    let ours = |event: &str| {
        capture.count_events(|e| {
            e.op() == Some("load_snapshot")
                && e.event() == Some(event)
                && e.field(FIELD_SOURCE) == Some(source.as_str())
        })
    };
    assert_eq!(ours(EVENT_START), 1);
    assert_eq!(ours(EVENT_END), 1);
    assert_eq!(ours(EVENT_END_ERROR), 0);

    let end = capture
        .events_for_op("load_snapshot")
        .into_iter()
        .find(|e| e.event() == Some(EVENT_END) && e.field(FIELD_SOURCE) == Some(source.as_str()))
        .unwrap();
    assert_eq!(end.field(FIELD_ROWS), Some("2"));
}

// S2: a failed load ends with an error event carrying the stable code
#[test]
fn test_load_snapshot_error_event() {
    let capture = init_test_capture();
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("boundary_missing.csv");
    let source = path.display().to_string();

    load_snapshot(&path, &LoadOptions::default()).unwrap_err();

    let error = capture
        .events_for_op("load_snapshot")
        .into_iter()
        .find(|e| {
            e.event() == Some(EVENT_END_ERROR) && e.field(FIELD_SOURCE) == Some(source.as_str())
        })
        .expect("Should have error event");
    assert_eq!(error.field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
}

// S3: a duplicate key is a warning, not a failure
#[test]
fn test_key_collision_is_logged_as_warning() {
    let capture = init_test_capture();
    let tmp = tempfile::tempdir().unwrap();
    let path = write_file(tmp.path(), "boundary_dup.csv", "id;v\n7;a\n7;b\n");
    let source = path.display().to_string();

    load_snapshot(&path, &LoadOptions::default()).unwrap();

    let warnings = capture.count_events(|e| {
        e.level == Level::WARN
            && e.field(FIELD_SOURCE) == Some(source.as_str())
            && e.field(FIELD_ERR_CODE) == Some("ERR_KEY_COLLISION")
            && e.field(FIELD_KEY) == Some("7")
    });
    assert_eq!(warnings, 1);
}

#[test]
fn test_scan_catalog_boundary_events() {
    let capture = init_test_capture();
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().display().to_string();

    scan_catalog(tmp.path()).unwrap();

    let count = capture.count_events(|e| {
        e.op() == Some("scan_catalog") && e.field(FIELD_PATH) == Some(path.as_str())
    });
    assert_eq!(count, 2);
}

#[test]
fn test_capture_records_integers_and_bools_plainly() {
    let capture = init_test_capture();
    tracing::info!(op = "test_capture_plain_values_unique_10", rows = 7u64, ok = true);

    let events = capture.events_for_op("test_capture_plain_values_unique_10");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field(FIELD_ROWS), Some("7"));
    assert_eq!(events[0].field("ok"), Some("true"));
}
