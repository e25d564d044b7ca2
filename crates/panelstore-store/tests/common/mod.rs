//! Shared fixtures for store integration tests

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use chrono::{TimeZone, Utc};
use panelstore_core::{PanelInformation, PanelLocation, PanelRecord};
use panelstore_store::columnar::{self, Relation};
use panelstore_store::{SnapshotLayout, SolarPanelRepository};
use tempfile::TempDir;

/// A repository over a fresh temporary data directory
pub struct Fixture {
    pub dir: TempDir,
    pub repo: SolarPanelRepository,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let repo = SolarPanelRepository::new(SnapshotLayout::new(dir.path(), "parquet"));
        Self { dir, repo }
    }

    pub fn layout(&self) -> &SnapshotLayout {
        self.repo.layout()
    }

    pub fn write_information(&self, rows: &[PanelInformation]) {
        let table = PanelInformation::to_table(rows).unwrap();
        columnar::save(&self.layout().information_path(), &table).unwrap();
    }

    pub fn write_location(&self, rows: &[PanelLocation]) {
        let table = PanelLocation::to_table(rows).unwrap();
        columnar::save(&self.layout().location_path(), &table).unwrap();
    }

    /// Write matching sources for the given keys and build the derived snapshot
    pub fn seeded(ids: &[i64]) -> Self {
        let fixture = Self::new();
        fixture.write_information(&ids.iter().map(|&id| information(id)).collect::<Vec<_>>());
        fixture.write_location(&ids.iter().map(|&id| location(id)).collect::<Vec<_>>());
        fixture.repo.create().unwrap();
        fixture
    }
}

pub fn information(id: i64) -> PanelInformation {
    PanelInformation {
        id,
        voltage: 200.0 + id as f64,
        temperature: 20.0 + (id % 10) as f64,
        status: if id % 3 == 0 { "Fault" } else { "OK" }.to_string(),
        installed_at: Utc.with_ymd_and_hms(2018, 3, 14, 9, 26, 53).unwrap()
            + chrono::Duration::days(id),
    }
}

pub fn location(id: i64) -> PanelLocation {
    PanelLocation {
        id,
        latitude: (id % 90) as f64,
        longitude: -((id % 180) as f64),
    }
}

/// The derived row that `create` produces from `information(id)` and `location(id)`
pub fn record(id: i64) -> PanelRecord {
    let info = information(id);
    let loc = location(id);
    PanelRecord {
        id,
        voltage: info.voltage,
        temperature: info.temperature,
        status: info.status,
        installed_at: info.installed_at,
        latitude: loc.latitude,
        longitude: loc.longitude,
    }
}
