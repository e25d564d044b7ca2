//! Configuration resolution shared by every command
//!
//! Precedence, lowest to highest: built-in defaults, `--config` file,
//! `PANELSTORE_*` environment variables (a `.env` file is loaded first),
//! `--data-dir`.

use clap::Args;
use panelstore_store::{SolarPanelRepository, StoreConfig};
use std::path::{Path, PathBuf};

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Directory holding the snapshot files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true, env = "PANELSTORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit JSON logs on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,
}

pub struct Context {
    pub repo: SolarPanelRepository,
}

impl Context {
    pub fn resolve(global: &GlobalArgs) -> CliResult<Self> {
        let config = resolve_config(global.config.as_deref(), global.data_dir.as_deref())?;
        tracing::debug!(
            data_dir = %config.data_dir.display(),
            extension = %config.extension,
            "Resolved store configuration"
        );
        Ok(Self {
            repo: SolarPanelRepository::open(&config)?,
        })
    }
}

fn resolve_config(file: Option<&Path>, data_dir: Option<&Path>) -> CliResult<StoreConfig> {
    let mut config = match file {
        Some(path) => StoreConfig::from_toml_file(path)?,
        None => StoreConfig::default(),
    }
    .with_env_overrides();

    if let Some(dir) = data_dir {
        config.data_dir = dir.to_path_buf();
    }
    Ok(config)
}
