//! Store configuration
//!
//! Resolution order, later wins: built-in defaults, TOML file, environment
//! (`PANELSTORE_DATA_DIR`, `PANELSTORE_EXTENSION`), explicit overrides from
//! the caller.
//!
//! ```toml
//! data_dir = "/var/lib/panelstore"
//! extension = "parquet"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{config_error, Result};

pub const ENV_DATA_DIR: &str = "PANELSTORE_DATA_DIR";
pub const ENV_EXTENSION: &str = "PANELSTORE_EXTENSION";

/// Where the snapshots live and what they are called
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    /// File extension shared by all three snapshots, without the dot
    pub extension: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            extension: "parquet".to_string(),
        }
    }
}

impl StoreConfig {
    /// Parse a TOML document; absent keys keep their defaults
    ///
    /// # Errors
    ///
    /// `Config` for malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| config_error("parse_config", e.to_string()))
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// `Config` if the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            config_error(
                "read_config",
                format!("cannot read {}: {}", path.display(), e),
            )
        })?;
        Self::from_toml_str(&source)
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(ext) = lookup(ENV_EXTENSION).filter(|v| !v.is_empty()) {
            self.extension = ext;
        }
        self
    }

    /// Apply `PANELSTORE_*` variables from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Reject settings that would not produce usable snapshot paths
    ///
    /// # Errors
    ///
    /// `Config` for an empty data directory, or an extension that is empty or
    /// contains a dot or path separator.
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(config_error("validate_config", "data_dir must not be empty"));
        }
        if self.extension.is_empty()
            || self
                .extension
                .chars()
                .any(|c| c == '.' || c == '/' || c == '\\')
        {
            return Err(config_error(
                "validate_config",
                format!(
                    "extension '{}' must be non-empty and contain no dots or separators",
                    self.extension
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelstore_core::errors::PsErrorKind;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.extension, "parquet");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StoreConfig::from_toml_str(r#"data_dir = "/srv/panels""#).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/panels"));
        assert_eq!(config.extension, "parquet");
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let err = StoreConfig::from_toml_str(r#"dataDir = "x""#).unwrap_err();
        assert_eq!(err.kind(), PsErrorKind::Config);
    }

    #[test]
    fn test_overrides_win() {
        let vars: HashMap<&str, &str> =
            [(ENV_DATA_DIR, "/tmp/p"), (ENV_EXTENSION, "pq")].into_iter().collect();

        let config = StoreConfig::default().apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/p"));
        assert_eq!(config.extension, "pq");
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let config = StoreConfig::default().apply_overrides(|_| Some(String::new()));
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let config = StoreConfig {
            extension: ".parquet".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().kind(), PsErrorKind::Config);
    }
}
