//! Write paths over the derived snapshot
//!
//! Each mutation is a full read-modify-rewrite of the derived file: O(n) in
//! the snapshot size regardless of how many rows change. The rewrite
//! truncates the file in place and holds no lock, so concurrent mutations
//! lose updates and a crash mid-rewrite leaves a truncated file behind.

use panelstore_core::{log_op_end, log_op_error, log_op_start};
use panelstore_core::{PanelRecord, PanelUpdate};
use std::time::Instant;

use crate::columnar::schema::COL_ID;
use crate::columnar::{self, Predicate, Relation, Table};
use crate::errors::{record_not_found, Result};
use crate::layout::SnapshotLayout;

/// Update-by-key, delete-by-key and delete-all
pub struct MutationFacade<'a> {
    layout: &'a SnapshotLayout,
}

impl<'a> MutationFacade<'a> {
    pub fn new(layout: &'a SnapshotLayout) -> Self {
        Self { layout }
    }

    /// Apply `fields` to the record with key `id` and rewrite the snapshot
    ///
    /// Every row carrying `id` is changed and the first of them is returned.
    /// The key itself is immutable: an `id` in the payload is ignored. The
    /// whole snapshot is rewritten even when the payload changes nothing.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no row has this key (the file is not rewritten)
    /// - `SnapshotNotFound` / `SnapshotCorrupt` on load
    /// - `Io` / `Serialization` on rewrite
    pub fn update(&self, id: i64, fields: &PanelUpdate) -> Result<PanelRecord> {
        let start = Instant::now();
        log_op_start!("update", panel_id = id);

        let result = self.apply_update(id, fields);

        match result {
            Ok(record) => {
                log_op_end!(
                    "update",
                    duration_ms = start.elapsed().as_millis() as u64,
                    panel_id = id
                );
                Ok(record)
            }
            Err(e) => {
                log_op_error!(
                    "update",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    panel_id = id
                );
                Err(e)
            }
        }
    }

    /// Rewrite the snapshot without the rows keyed `id`
    ///
    /// # Errors
    ///
    /// - `NotFound` when no row has this key (the file is not rewritten)
    /// - `SnapshotNotFound` / `SnapshotCorrupt` on load
    /// - `Io` / `Serialization` on rewrite
    pub fn remove(&self, id: i64) -> Result<()> {
        let start = Instant::now();
        log_op_start!("remove", panel_id = id);

        let result = self.exclude(id);

        match result {
            Ok(remaining) => {
                log_op_end!(
                    "remove",
                    duration_ms = start.elapsed().as_millis() as u64,
                    panel_id = id,
                    row_count = remaining
                );
                Ok(())
            }
            Err(e) => {
                log_op_error!(
                    "remove",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    panel_id = id
                );
                Err(e)
            }
        }
    }

    /// Delete the derived snapshot file
    ///
    /// Returns whether a file was deleted; an already absent snapshot is not
    /// an error. Reads and mutations fail with `SnapshotNotFound` until the
    /// next `create`.
    ///
    /// # Errors
    ///
    /// `Io` if the file exists but cannot be removed.
    pub fn remove_all(&self) -> Result<bool> {
        let start = Instant::now();
        let target = self.layout.record_path();
        log_op_start!("remove_all", snapshot_path = %target.display());

        match columnar::delete(&target) {
            Ok(deleted) => {
                log_op_end!(
                    "remove_all",
                    duration_ms = start.elapsed().as_millis() as u64,
                    deleted = deleted
                );
                Ok(deleted)
            }
            Err(e) => {
                log_op_error!(
                    "remove_all",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(e)
            }
        }
    }

    fn load_records(&self) -> Result<Table> {
        columnar::load(&self.layout.record_path(), &PanelRecord::schema())
    }

    fn apply_update(&self, id: i64, fields: &PanelUpdate) -> Result<PanelRecord> {
        let table = self.load_records()?;
        let mut records = PanelRecord::from_table(&table)?;

        let mut first = None;
        for record in records.iter_mut().filter(|record| record.id == id) {
            fields.apply(record);
            first.get_or_insert_with(|| record.clone());
        }
        let updated = first.ok_or_else(|| record_not_found("update", id))?;

        if let Some(requested) = fields.id.filter(|requested| *requested != id) {
            tracing::warn!(
                panel_id = id,
                requested_id = requested,
                "Ignoring id in update payload; keys are immutable"
            );
        }

        let rewritten = PanelRecord::to_table(&records)?;
        columnar::save(&self.layout.record_path(), &rewritten)?;

        Ok(updated)
    }

    fn exclude(&self, id: i64) -> Result<usize> {
        let table = self.load_records()?;
        let kept = columnar::scan(&table, Some(&Predicate::key_ne(COL_ID, id)))?;

        if kept.num_rows() == table.num_rows() {
            return Err(record_not_found("remove", id));
        }

        columnar::save(&self.layout.record_path(), &kept)?;
        Ok(kept.num_rows())
    }
}
