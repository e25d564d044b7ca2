//! Columnar snapshot store
//!
//! Provides:
//! - Parquet snapshot load with projection and schema conformance
//! - In-place and temp→rename snapshot writes
//! - Equi-join, predicate scan, limit/offset window and projection over tables
//! - Explicit field-by-field conversion between tables and typed rows

mod atomic;
pub mod file;
pub mod ops;
pub mod relation;
pub mod schema;
mod table;

pub use file::{delete, load, save, save_atomic};
pub use ops::{join, paginate, project, scan, Predicate};
pub use relation::Relation;
pub use table::Table;
