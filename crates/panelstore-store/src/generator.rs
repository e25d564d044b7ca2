//! Synthetic source snapshots
//!
//! Writes `solar_panel_information` and `solar_panel_location` with keys
//! `1..=rows` so that a subsequent `create` has something to join. With a
//! seed the output is reproducible.

use chrono::{DateTime, TimeZone, Utc};
use panelstore_core::model::KNOWN_STATUSES;
use panelstore_core::{log_op_end, log_op_error, log_op_start};
use panelstore_core::{PanelInformation, PanelLocation};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Instant;

use crate::columnar::{self, Relation};
use crate::errors::{invalid_argument, Result};
use crate::layout::SnapshotLayout;

const VOLTAGE_RANGE: std::ops::Range<f64> = 200.0..350.0;
const TEMPERATURE_RANGE: std::ops::Range<f64> = 10.0..50.0;
const LATITUDE_RANGE: std::ops::Range<f64> = -90.0..90.0;
const LONGITUDE_RANGE: std::ops::Range<f64> = -180.0..180.0;

/// Generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub rows: usize,
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            rows: 1_000,
            seed: None,
        }
    }
}

/// What was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    pub rows: usize,
    pub seed: Option<u64>,
}

/// Generate both source snapshots and write them under `layout`
///
/// Existing source files are replaced atomically. The derived snapshot is not
/// touched.
///
/// # Errors
///
/// - `InvalidArgument` if `rows` is zero or exceeds the `i64` key space
/// - `Io` / `Serialization` while writing either file
pub fn generate_sources(layout: &SnapshotLayout, options: GeneratorOptions) -> Result<GenerateReport> {
    let start = Instant::now();
    log_op_start!("generate", row_count = options.rows);

    let result = write_sources(layout, options);

    match result {
        Ok(report) => {
            log_op_end!(
                "generate",
                duration_ms = start.elapsed().as_millis() as u64,
                row_count = report.rows
            );
            Ok(report)
        }
        Err(e) => {
            log_op_error!(
                "generate",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}

/// In-memory rows for keys `1..=rows`, information and location in key order
///
/// # Errors
///
/// `InvalidArgument` if `rows` is zero or does not fit in an `i64` key.
pub fn generate_rows<R: Rng>(
    rng: &mut R,
    rows: usize,
) -> Result<(Vec<PanelInformation>, Vec<PanelLocation>)> {
    if rows == 0 {
        return Err(invalid_argument("generate", "rows must be at least 1"));
    }
    let last = i64::try_from(rows)
        .map_err(|_| invalid_argument("generate", format!("{} rows exceed the key space", rows)))?;

    let window_start = install_window_start().timestamp();
    let window_end = install_window_end().timestamp();

    let mut information = Vec::with_capacity(rows);
    let mut location = Vec::with_capacity(rows);
    for id in 1..=last {
        let installed_secs = rng.random_range(window_start..=window_end);
        let status = KNOWN_STATUSES.choose(rng).copied().unwrap_or("OK");

        information.push(PanelInformation {
            id,
            voltage: rng.random_range(VOLTAGE_RANGE),
            temperature: rng.random_range(TEMPERATURE_RANGE),
            status: status.to_string(),
            installed_at: DateTime::<Utc>::from_timestamp(installed_secs, 0)
                .unwrap_or_else(install_window_start),
        });
        location.push(PanelLocation {
            id,
            latitude: rng.random_range(LATITUDE_RANGE),
            longitude: rng.random_range(LONGITUDE_RANGE),
        });
    }
    Ok((information, location))
}

fn write_sources(layout: &SnapshotLayout, options: GeneratorOptions) -> Result<GenerateReport> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let (information, location) = generate_rows(&mut rng, options.rows)?;

    columnar::save_atomic(
        &layout.information_path(),
        &PanelInformation::to_table(&information)?,
    )?;
    columnar::save_atomic(&layout.location_path(), &PanelLocation::to_table(&location)?)?;

    Ok(GenerateReport {
        rows: options.rows,
        seed: options.seed,
    })
}

fn install_window_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn install_window_end() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rows_are_keyed_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let (information, location) = generate_rows(&mut rng, 50).unwrap();

        assert_eq!(information.len(), 50);
        assert_eq!(location.len(), 50);
        for (i, (info, loc)) in information.iter().zip(&location).enumerate() {
            assert_eq!(info.id, i as i64 + 1);
            assert_eq!(loc.id, info.id);
            assert!(VOLTAGE_RANGE.contains(&info.voltage));
            assert!(TEMPERATURE_RANGE.contains(&info.temperature));
            assert!(KNOWN_STATUSES.contains(&info.status.as_str()));
            assert!(info.installed_at >= install_window_start());
            assert!(info.installed_at <= install_window_end());
            assert_eq!(info.installed_at.timestamp_subsec_micros(), 0);
            assert!(LATITUDE_RANGE.contains(&loc.latitude));
            assert!(LONGITUDE_RANGE.contains(&loc.longitude));
        }
    }

    #[test]
    fn test_same_seed_same_rows() {
        let first = generate_rows(&mut StdRng::seed_from_u64(42), 10).unwrap();
        let second = generate_rows(&mut StdRng::seed_from_u64(42), 10).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_rows_rejected() {
        let err = generate_rows(&mut StdRng::seed_from_u64(1), 0).unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_ARGUMENT");
    }

    #[test]
    fn test_generate_sources_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let layout = SnapshotLayout::new(dir.path(), "parquet");

        let report = generate_sources(
            &layout,
            GeneratorOptions {
                rows: 12,
                seed: Some(3),
            },
        )
        .unwrap();
        assert_eq!(report.rows, 12);

        let information =
            columnar::load(&layout.information_path(), &PanelInformation::schema()).unwrap();
        let location = columnar::load(&layout.location_path(), &PanelLocation::schema()).unwrap();
        assert_eq!(information.num_rows(), 12);
        assert_eq!(location.num_rows(), 12);
        assert!(!layout.record_path().exists());
    }
}
