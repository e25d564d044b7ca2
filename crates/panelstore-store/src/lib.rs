//! panelstore store - columnar snapshot storage for solar-panel data
//!
//! Provides:
//! - Parquet snapshot load/save with schema conformance checks
//! - Relational operations over in-memory tables (equi-join, filter, window)
//! - The join materializer that builds the derived `solar_panel` snapshot
//! - Query and mutation facades serving that snapshot
//! - Snapshot layout and configuration
//! - A synthetic generator for the two source relations
//!
//! There is no index, no write-ahead log and no locking. Every mutation
//! rewrites the whole derived file; two concurrent writers race and the last
//! one to finish wins.

pub mod columnar;
pub mod config;
pub mod errors;
pub mod generator;
pub mod layout;
pub mod repo;

// Re-export key types
pub use config::StoreConfig;
pub use errors::Result;
pub use generator::{generate_sources, GenerateReport, GeneratorOptions};
pub use layout::SnapshotLayout;
pub use repo::{
    JoinMaterializer, MaterializeReport, MutationFacade, QueryFacade, SolarPanelRepository,
};
