//! Canonical logging macros
//!
//! Every repository operation is bracketed by one start event and exactly one
//! of end / end_error, all carrying `component` and `op`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use panelstore_core::log_op_start;
/// log_op_start!("find_one");
/// log_op_start!("find_one", panel_id = 42);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use panelstore_core::log_op_end;
/// log_op_end!("find_all", duration_ms = 42, row_count = 10);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `PsError` and records its kind and
/// stable code.
///
/// # Example
///
/// ```
/// # use panelstore_core::{log_op_error, errors::PanelError};
/// let err = PanelError::RecordNotFound { id: 1 };
/// log_op_error!("find_one", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ps_err: $crate::errors::PsError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ps_err.kind(),
            err_code = ps_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ps_err: $crate::errors::PsError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ps_err.kind(),
            err_code = ps_err.code(),
            $($field)*
        );
    }};
}
