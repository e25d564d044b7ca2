//! Error handling for panelstore-store
//!
//! Wraps the panelstore-core PsError with store-specific helpers

use panelstore_core::errors::{PanelError, PsError, PsErrorKind};
use std::path::Path;

/// Result type alias using PsError
pub type Result<T> = std::result::Result<T, PsError>;

/// Create a missing snapshot error
pub fn snapshot_not_found(op: &str, path: &Path) -> PsError {
    PsError::from(PanelError::SnapshotNotFound {
        path: path.to_path_buf(),
    })
    .with_op(op)
}

/// Create an unreadable snapshot error
pub fn snapshot_corrupt(op: &str, path: &Path, reason: impl Into<String>) -> PsError {
    PsError::from(PanelError::SnapshotCorrupt {
        path: path.to_path_buf(),
        reason: reason.into(),
    })
    .with_op(op)
}

/// Create a missing row error
pub fn record_not_found(op: &str, id: i64) -> PsError {
    PsError::from(PanelError::RecordNotFound { id }).with_op(op)
}

/// Create an invalid argument error
pub fn invalid_argument(op: &str, reason: impl Into<String>) -> PsError {
    PsError::from(PanelError::InvalidArgument {
        reason: reason.into(),
    })
    .with_op(op)
}

/// Create an IO error
pub fn io_error(op: &str, path: &Path, err: std::io::Error) -> PsError {
    PsError::new(PsErrorKind::Io)
        .with_op(op)
        .with_path(path)
        .with_message(err.to_string())
}

/// Create an encoder error for a snapshot being written
pub fn serialization_error(op: &str, path: &Path, err: impl std::fmt::Display) -> PsError {
    PsError::new(PsErrorKind::Serialization)
        .with_op(op)
        .with_path(path)
        .with_message(err.to_string())
}

/// Create a configuration error
pub fn config_error(op: &str, message: impl Into<String>) -> PsError {
    PsError::from(PanelError::Config {
        message: message.into(),
    })
    .with_op(op)
}

/// Create an internal error from an Arrow kernel failure
pub fn arrow_error(op: &str, err: arrow::error::ArrowError) -> PsError {
    PsError::new(PsErrorKind::Internal)
        .with_op(op)
        .with_message(err.to_string())
}
