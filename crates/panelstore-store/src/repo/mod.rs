//! Solar-panel repository
//!
//! `SolarPanelRepository` is the handle callers construct once (from a
//! [`StoreConfig`]) and pass to whatever serves requests. It owns only the
//! snapshot layout; every operation goes back to disk.
//!
//! ## Consistency
//!
//! - Reads see whatever the derived file holds at the moment they open it.
//! - `update` / `remove` read the whole derived snapshot, change it in memory
//!   and truncate-and-rewrite the file. There is no lock: two mutations
//!   racing on the same snapshot both succeed and the last rewrite to finish
//!   wins, silently discarding the other (lost update).
//! - A crash during such a rewrite can leave the derived file truncated; the
//!   next access then fails with `SnapshotCorrupt`. Rebuilding with `create`
//!   recovers from the sources.
//! - `create` replaces the derived file via temp file + rename and never
//!   exposes a partial result.

mod materializer;
mod mutation;
mod query;

pub use materializer::{JoinMaterializer, MaterializeReport};
pub use mutation::MutationFacade;
pub use query::QueryFacade;

use panelstore_core::{PaginatedResult, PanelRecord, PanelUpdate};

use crate::config::StoreConfig;
use crate::errors::Result;
use crate::layout::SnapshotLayout;

/// Handle to the solar-panel snapshots under one data directory
#[derive(Debug, Clone)]
pub struct SolarPanelRepository {
    layout: SnapshotLayout,
}

impl SolarPanelRepository {
    pub fn new(layout: SnapshotLayout) -> Self {
        Self { layout }
    }

    /// Build a repository from validated configuration
    ///
    /// # Errors
    ///
    /// `Config` if the configuration fails validation.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(SnapshotLayout::from(config)))
    }

    pub fn layout(&self) -> &SnapshotLayout {
        &self.layout
    }

    pub fn materializer(&self) -> JoinMaterializer<'_> {
        JoinMaterializer::new(&self.layout)
    }

    pub fn query(&self) -> QueryFacade<'_> {
        QueryFacade::new(&self.layout)
    }

    pub fn mutation(&self) -> MutationFacade<'_> {
        MutationFacade::new(&self.layout)
    }

    /// Rebuild the derived snapshot from the two sources
    ///
    /// # Errors
    ///
    /// See [`JoinMaterializer::create`].
    pub fn create(&self) -> Result<MaterializeReport> {
        self.materializer().create()
    }

    /// # Errors
    ///
    /// See [`QueryFacade::find_all`].
    pub fn find_all(&self) -> Result<Vec<PanelRecord>> {
        self.query().find_all()
    }

    /// # Errors
    ///
    /// See [`QueryFacade::find_one`].
    pub fn find_one(&self, id: i64) -> Result<PanelRecord> {
        self.query().find_one(id)
    }

    /// # Errors
    ///
    /// See [`QueryFacade::find_paginated`].
    pub fn find_paginated(
        &self,
        limit: usize,
        page_number: usize,
    ) -> Result<PaginatedResult<PanelRecord>> {
        self.query().find_paginated(limit, page_number)
    }

    /// # Errors
    ///
    /// See [`QueryFacade::find_all_online`].
    pub fn find_all_online(&self) -> Result<Vec<PanelRecord>> {
        self.query().find_all_online()
    }

    /// # Errors
    ///
    /// See [`MutationFacade::update`].
    pub fn update(&self, id: i64, fields: &PanelUpdate) -> Result<PanelRecord> {
        self.mutation().update(id, fields)
    }

    /// # Errors
    ///
    /// See [`MutationFacade::remove`].
    pub fn remove(&self, id: i64) -> Result<()> {
        self.mutation().remove(id)
    }

    /// # Errors
    ///
    /// See [`MutationFacade::remove_all`].
    pub fn remove_all(&self) -> Result<bool> {
        self.mutation().remove_all()
    }
}
