//! Crash-safe file replacement shared by config and storage writers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Write `contents` to `path` via a sibling temp file and rename.
///
/// The temp file is `path` with its extension replaced by `tmp_extension`.
/// Missing parent directories are created.
pub fn write_atomic(path: &Path, contents: &str, tmp_extension: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension(tmp_extension);
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}
