//! Read paths over the derived snapshot

use panelstore_core::errors::PsError;
use panelstore_core::pagination::{page_offset, PageInfo};
use panelstore_core::{log_op_end, log_op_error, log_op_start};
use panelstore_core::{PaginatedResult, PanelRecord};
use std::time::Instant;

use super::materializer::{join_sources, load_sources};
use crate::columnar::schema::COL_ID;
use crate::columnar::{self, Predicate, Relation, Table};
use crate::errors::{record_not_found, Result};
use crate::layout::SnapshotLayout;

/// Find-all, find-by-key and paginated reads
pub struct QueryFacade<'a> {
    layout: &'a SnapshotLayout,
}

impl<'a> QueryFacade<'a> {
    pub fn new(layout: &'a SnapshotLayout) -> Self {
        Self { layout }
    }

    /// Every record of the derived snapshot, in join order
    ///
    /// # Errors
    ///
    /// `SnapshotNotFound` before the first `create` or after `remove_all`;
    /// `SnapshotCorrupt` if the file is unreadable.
    pub fn find_all(&self) -> Result<Vec<PanelRecord>> {
        let start = Instant::now();
        log_op_start!("find_all");

        let result = self
            .load_records()
            .and_then(|table| PanelRecord::from_table(&table));

        match result {
            Ok(records) => {
                log_op_end!(
                    "find_all",
                    duration_ms = start.elapsed().as_millis() as u64,
                    row_count = records.len()
                );
                Ok(records)
            }
            Err(e) => {
                log_op_error!(
                    "find_all",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(e)
            }
        }
    }

    /// The record with key `id`
    ///
    /// Keys are unique in a well-formed snapshot. If a damaged snapshot holds
    /// duplicates, the first one in file order is returned.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has this key, plus the snapshot errors of
    /// [`find_all`](Self::find_all).
    pub fn find_one(&self, id: i64) -> Result<PanelRecord> {
        let start = Instant::now();
        log_op_start!("find_one", panel_id = id);

        let result = self.lookup(id);

        match result {
            Ok(record) => {
                log_op_end!(
                    "find_one",
                    duration_ms = start.elapsed().as_millis() as u64,
                    panel_id = id
                );
                Ok(record)
            }
            Err(e) => {
                log_op_error!(
                    "find_one",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    panel_id = id
                );
                Err(e)
            }
        }
    }

    /// Page `page_number` (1-based) of `limit` records
    ///
    /// The window starts at row `(page_number - 1) * limit`. A page past the
    /// end is returned empty, with `total_records` still set.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `limit` or `page_number` is zero (checked before
    /// touching the file), plus the snapshot errors of [`find_all`](Self::find_all).
    pub fn find_paginated(
        &self,
        limit: usize,
        page_number: usize,
    ) -> Result<PaginatedResult<PanelRecord>> {
        let start = Instant::now();
        log_op_start!("find_paginated", limit = limit, page_number = page_number);

        let result = self.page(limit, page_number);

        match result {
            Ok(page) => {
                log_op_end!(
                    "find_paginated",
                    duration_ms = start.elapsed().as_millis() as u64,
                    row_count = page.records.len(),
                    total_records = page.page.total_records
                );
                Ok(page)
            }
            Err(e) => {
                log_op_error!(
                    "find_paginated",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(e)
            }
        }
    }

    /// Join the two sources on the fly, bypassing the derived snapshot
    ///
    /// Sees source changes made since the last `create`, and works when the
    /// derived snapshot does not exist.
    ///
    /// # Errors
    ///
    /// `SnapshotNotFound` / `SnapshotCorrupt` from either source.
    pub fn find_all_online(&self) -> Result<Vec<PanelRecord>> {
        let start = Instant::now();
        log_op_start!("find_all_online");

        let result = load_sources(self.layout)
            .and_then(|(information, location)| join_sources(&information, &location))
            .and_then(|joined| PanelRecord::from_table(&joined));

        match result {
            Ok(records) => {
                log_op_end!(
                    "find_all_online",
                    duration_ms = start.elapsed().as_millis() as u64,
                    row_count = records.len()
                );
                Ok(records)
            }
            Err(e) => {
                log_op_error!(
                    "find_all_online",
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

    fn lookup(&self, id: i64) -> Result<PanelRecord> {
        let table = self.load_records()?;
        let hits = columnar::scan(&table, Some(&Predicate::key_eq(COL_ID, id)))?;
        let (first, _) = columnar::paginate(&hits, 1, 0);
        PanelRecord::from_table(&first)?
            .into_iter()
            .next()
            .ok_or_else(|| record_not_found("find_one", id))
    }

    fn page(&self, limit: usize, page_number: usize) -> Result<PaginatedResult<PanelRecord>> {
        let offset = page_offset(limit, page_number)
            .map_err(|e| PsError::from(e).with_op("find_paginated"))?;

        let table = self.load_records()?;
        let (window, total_records) = columnar::paginate(&table, limit, offset);

        Ok(PaginatedResult {
            page: PageInfo::compute(limit, page_number, total_records),
            records: PanelRecord::from_table(&window)?,
        })
    }
}
