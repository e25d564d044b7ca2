//! panelstore core - domain model and shared facilities
//!
//! This crate provides the pieces of the solar-panel store that do not touch
//! the filesystem:
//! - Strongly-typed rows for the information, location and joined relations
//! - The update payload applied by the mutation path
//! - Page metadata computation for paginated scans
//! - The structured error facility and logging facility used by every layer

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod pagination;

// Re-export commonly used types
pub use errors::{PanelError, PsError, PsErrorKind, Result};
pub use model::{PanelInformation, PanelLocation, PanelRecord, PanelUpdate};
pub use pagination::{PageInfo, PaginatedResult};
