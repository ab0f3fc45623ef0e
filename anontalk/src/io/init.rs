//! Initialization helpers for the board data directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use super::config::{BoardConfig, write_config};

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".anontalk";

/// Canonical paths within a data directory.
#[derive(Debug, Clone)]
pub struct BoardPaths {
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
    pub storage_path: PathBuf,
}

impl BoardPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            config_path: data_dir.join("config.toml"),
            storage_path: data_dir.join("storage.json"),
            data_dir,
        }
    }
}

/// Options for `init_board`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing config and storage.
    pub force: bool,
}

/// Create the data directory with a default config and empty storage.
///
/// Fails if the directory already exists unless `options.force` is set.
pub fn init_board(data_dir: &Path, options: &InitOptions) -> Result<BoardPaths> {
    let paths = BoardPaths::new(data_dir);
    if paths.data_dir.exists() && !options.force {
        return Err(anyhow!(
            "init: {} already exists (use --force to overwrite)",
            paths.data_dir.display()
        ));
    }
    if paths.data_dir.exists() && !paths.data_dir.is_dir() {
        return Err(anyhow!(
            "init: {} exists but is not a directory",
            paths.data_dir.display()
        ));
    }

    fs::create_dir_all(&paths.data_dir)
        .with_context(|| format!("create directory {}", paths.data_dir.display()))?;
    write_config(&paths.config_path, &BoardConfig::default())?;
    fs::write(&paths.storage_path, "{}\n")
        .with_context(|| format!("write file {}", paths.storage_path.display()))?;

    debug!(data_dir = %paths.data_dir.display(), "board initialized");
    Ok(paths)
}
