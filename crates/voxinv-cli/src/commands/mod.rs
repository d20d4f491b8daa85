//! Subcommands.

pub mod analyze;
pub mod batch;
pub mod config;

use std::path::Path;

use tracing::debug;

use voxinv_core::VoxConfig;

/// Load the config given on the command line, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<VoxConfig> {
    if let Some(path) = config_path {
        return Ok(VoxConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(VoxConfig::from_file(&default_path)?)
    } else {
        Ok(VoxConfig::default())
    }
}
