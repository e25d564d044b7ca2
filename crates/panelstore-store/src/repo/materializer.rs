//! Derived snapshot construction

use panelstore_core::{log_op_end, log_op_error, log_op_start};
use panelstore_core::{PanelInformation, PanelLocation};
use serde::Serialize;
use std::time::Instant;

use crate::columnar::schema::JOIN_KEY;
use crate::columnar::{self, Relation, Table};
use crate::errors::Result;
use crate::layout::SnapshotLayout;

/// Row counts observed while rebuilding the derived snapshot
///
/// The `dropped_*` counts are rows of one source whose key has no partner in
/// the other. They are discarded by the inner join; nothing reconciles them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaterializeReport {
    pub information_rows: usize,
    pub location_rows: usize,
    pub joined_rows: usize,
    pub dropped_information_rows: usize,
    pub dropped_location_rows: usize,
}

/// Builds `solar_panel` as the inner join of the two source snapshots
pub struct JoinMaterializer<'a> {
    layout: &'a SnapshotLayout,
}

impl<'a> JoinMaterializer<'a> {
    pub fn new(layout: &'a SnapshotLayout) -> Self {
        Self { layout }
    }

    /// Load both sources, join them on `id` and replace the derived snapshot
    ///
    /// Rebuilding from unchanged sources produces the same rows in the same
    /// order (information order). The derived file is replaced via temp file
    /// and rename; on any failure the previous derived file, if any, is left
    /// as it was.
    ///
    /// # Errors
    ///
    /// - `SnapshotNotFound` / `SnapshotCorrupt` from either source
    /// - `Io` / `Serialization` while writing the derived snapshot
    pub fn create(&self) -> Result<MaterializeReport> {
        let start = Instant::now();
        let target = self.layout.record_path();
        log_op_start!("create", snapshot_path = %target.display());

        match self.materialize() {
            Ok(report) => {
                log_op_end!(
                    "create",
                    duration_ms = start.elapsed().as_millis() as u64,
                    row_count = report.joined_rows,
                    dropped_rows = report.dropped_information_rows + report.dropped_location_rows
                );
                Ok(report)
            }
            Err(e) => {
                log_op_error!(
                    "create",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(e)
            }
        }
    }

    fn materialize(&self) -> Result<MaterializeReport> {
        let (information, location) = load_sources(self.layout)?;
        let joined = join_sources(&information, &location)?;

        columnar::save_atomic(&self.layout.record_path(), &joined)?;

        let report = MaterializeReport {
            information_rows: information.num_rows(),
            location_rows: location.num_rows(),
            joined_rows: joined.num_rows(),
            dropped_information_rows: information.num_rows().saturating_sub(joined.num_rows()),
            dropped_location_rows: location.num_rows().saturating_sub(joined.num_rows()),
        };
        if report.dropped_information_rows > 0 || report.dropped_location_rows > 0 {
            tracing::warn!(
                dropped_information_rows = report.dropped_information_rows,
                dropped_location_rows = report.dropped_location_rows,
                "Inner join dropped rows without a partner in the other source"
            );
        }
        Ok(report)
    }
}

/// Load the information and location snapshots
pub(crate) fn load_sources(layout: &SnapshotLayout) -> Result<(Table, Table)> {
    let information = columnar::load(&layout.information_path(), &PanelInformation::schema())?;
    let location = columnar::load(&layout.location_path(), &PanelLocation::schema())?;
    Ok((information, location))
}

/// Inner equi-join of information and location on `id`, information order
pub(crate) fn join_sources(information: &Table, location: &Table) -> Result<Table> {
    columnar::join(information, location, JOIN_KEY)
}
