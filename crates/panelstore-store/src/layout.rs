//! On-disk snapshot layout
//!
//! ```text
//! <data_dir>/solar_panel_information.<ext>   read-only input
//! <data_dir>/solar_panel_location.<ext>      read-only input
//! <data_dir>/solar_panel.<ext>               derived, owned by the repository
//! ```

use std::path::{Path, PathBuf};

use crate::config::StoreConfig;

pub const INFORMATION_STEM: &str = "solar_panel_information";
pub const LOCATION_STEM: &str = "solar_panel_location";
pub const RECORD_STEM: &str = "solar_panel";

/// Resolved paths of the three snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotLayout {
    data_dir: PathBuf,
    extension: String,
}

impl SnapshotLayout {
    pub fn new(data_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            extension: extension.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn information_path(&self) -> PathBuf {
        self.path_for(INFORMATION_STEM)
    }

    pub fn location_path(&self) -> PathBuf {
        self.path_for(LOCATION_STEM)
    }

    /// Path of the derived snapshot
    pub fn record_path(&self) -> PathBuf {
        self.path_for(RECORD_STEM)
    }

    fn path_for(&self, stem: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", stem, self.extension))
    }
}

impl From<&StoreConfig> for SnapshotLayout {
    fn from(config: &StoreConfig) -> Self {
        Self::new(config.data_dir.clone(), config.extension.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let layout = SnapshotLayout::new("/srv/panels", "parquet");

        assert_eq!(
            layout.information_path(),
            PathBuf::from("/srv/panels/solar_panel_information.parquet")
        );
        assert_eq!(
            layout.location_path(),
            PathBuf::from("/srv/panels/solar_panel_location.parquet")
        );
        assert_eq!(
            layout.record_path(),
            PathBuf::from("/srv/panels/solar_panel.parquet")
        );
    }

    #[test]
    fn test_from_config() {
        let config = StoreConfig {
            data_dir: PathBuf::from("d"),
            extension: "pq".to_string(),
        };
        let layout = SnapshotLayout::from(&config);
        assert_eq!(layout.record_path(), PathBuf::from("d/solar_panel.pq"));
    }
}
