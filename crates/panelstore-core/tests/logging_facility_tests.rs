#![allow(clippy::unwrap_used, clippy::expect_used)]

use panelstore_core::errors::{PanelError, PsError, PsErrorKind};
use panelstore_core::logging_facility::test_capture::init_test_capture;
use panelstore_core::{log_op_end, log_op_error, log_op_start};
use panelstore_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_PANEL_ID,
};
use tracing::Level;

#[test]
fn test_start_event_carries_component() {
    let capture = init_test_capture();
    let op_name = "facility_start_op";

    log_op_start!(op_name);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event(), Some(EVENT_START));
    assert_eq!(events[0].level, Level::INFO);
    assert!(events[0]
        .component()
        .is_some_and(|c| c.starts_with("logging_facility_tests")));
}

#[test]
fn test_end_event_records_duration_and_extra_fields() {
    let capture = init_test_capture();
    let op_name = "facility_end_op";

    log_op_end!(op_name, duration_ms = 42, panel_id = 7i64, row_count = 3usize);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event(), Some(EVENT_END));
    assert_eq!(events[0].field(FIELD_DURATION_MS), Some("42"));
    assert_eq!(events[0].field(FIELD_PANEL_ID), Some("7"));
    assert_eq!(events[0].field("row_count"), Some("3"));
}

#[test]
fn test_error_event_renders_domain_error_code() {
    let capture = init_test_capture();
    let op_name = "facility_domain_error_op";

    log_op_error!(op_name, PanelError::RecordNotFound { id: 9 }, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].level, Level::ERROR);
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
    assert_eq!(events[0].field(FIELD_ERR_KIND), Some("NotFound"));
}

#[test]
fn test_error_event_accepts_structured_error() {
    let capture = init_test_capture();
    let op_name = "facility_ps_error_op";
    let err = PsError::new(PsErrorKind::SnapshotCorrupt).with_message("bad footer");

    log_op_error!(op_name, err, duration_ms = 1, panel_id = 12i64);

    assert_eq!(
        capture.lifecycle(op_name, FIELD_PANEL_ID, "12"),
        vec![EVENT_END_ERROR]
    );
    let events = capture.events_for_op(op_name);
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_SNAPSHOT_CORRUPT"));
}

#[test]
fn test_bracketed_operation_sequence() {
    let capture = init_test_capture();
    let op_name = "facility_sequence_op";

    log_op_start!(op_name, panel_id = 5i64);
    log_op_end!(op_name, duration_ms = 0, panel_id = 5i64);

    assert_eq!(
        capture.lifecycle(op_name, FIELD_PANEL_ID, "5"),
        vec![EVENT_START, EVENT_END]
    );
}
