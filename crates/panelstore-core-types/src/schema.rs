//! Names of structured log fields and operation events
//!
//! The `log_op_*` macros emit these keys; log consumers and the test capture
//! layer look them up by the same constants.

// Present on every operation event
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Subject of the operation
pub const FIELD_PANEL_ID: &str = "panel_id";
pub const FIELD_SNAPSHOT_PATH: &str = "snapshot_path";

// Row counts
pub const FIELD_ROW_COUNT: &str = "row_count";
pub const FIELD_DROPPED_ROWS: &str = "dropped_rows";

// Only on end_error
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Values of FIELD_EVENT
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_flat_identifiers() {
        for name in [
            FIELD_COMPONENT,
            FIELD_OP,
            FIELD_EVENT,
            FIELD_DURATION_MS,
            FIELD_REQUEST_ID,
            FIELD_PANEL_ID,
            FIELD_SNAPSHOT_PATH,
            FIELD_ROW_COUNT,
            FIELD_DROPPED_ROWS,
            FIELD_ERR_KIND,
            FIELD_ERR_CODE,
        ] {
            assert!(name.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "{}", name);
        }
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }
}
