//! Structured logging for repository operations
//!
//! Each repository operation emits one `start` event and then exactly one
//! `end` or `end_error` event, all tagged with `component` and `op`:
//!
//! ```rust
//! use panelstore_core::logging_facility::{init, Profile};
//! use panelstore_core::{log_op_end, log_op_start};
//!
//! init(Profile::Development);
//! log_op_start!("find_one", panel_id = 7);
//! log_op_end!("find_one", duration_ms = 3, panel_id = 7);
//! ```
//!
//! Tests install [`init_test_capture`] instead and assert on the recorded
//! events.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

// Macro expansions refer to the event names through this path so that callers
// do not need a direct dependency on panelstore-core-types.
#[doc(hidden)]
pub use panelstore_core_types::schema;
