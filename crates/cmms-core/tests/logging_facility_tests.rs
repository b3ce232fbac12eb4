#![allow(clippy::unwrap_used, clippy::expect_used)]

use cmms_core::errors::{CmmsError, ExError, ExErrorKind};
use cmms_core::logging_facility::test_capture::init_test_capture;
use cmms_core::{log_op_end, log_op_error, log_op_skipped, log_op_start};
use cmms_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_SKIPPED, EVENT_START};
use tracing::Level;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, entity = "equipments");

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].fields.get("entity"), Some(&"equipments".to_string()));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].fields.get("duration_ms"), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = CmmsError::RecordNotFound {
        entity: "equipments".to_string(),
        id: "eq-404".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);
    let event = &capture.events_for(op_name)[0];
    assert_eq!(event.level, Level::ERROR);
    assert_eq!(event.fields.get("err.code"), Some(&"ERR_NOT_FOUND".to_string()));
}

#[test]
fn test_log_op_error_accepts_ex_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = ExError::new(ExErrorKind::ImageCorrupt).with_message("bad header");
    log_op_error!(op_name, err, duration_ms = 0);

    let event = &capture.events_for(op_name)[0];
    assert_eq!(event.fields.get("err.code"), Some(&"ERR_IMAGE_CORRUPT".to_string()));
    assert_eq!(event.fields.get("message"), Some(&"bad header".to_string()));
}

#[test]
fn test_log_op_skipped_is_a_warning() {
    let capture = init_test_capture();
    let op_name = "test_log_op_skipped_unique_5";

    log_op_skipped!(op_name, reason = "context closed");

    let event = &capture.events_for(op_name)[0];
    assert_eq!(event.level, Level::WARN);
    assert_eq!(event.event.as_deref(), Some(EVENT_SKIPPED));
}
