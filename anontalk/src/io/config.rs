//! Board configuration stored under `<data-dir>/config.toml`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use super::atomic::write_atomic;
use crate::core::catalog::{GroupCatalog, MOCK_GROUP_IDS};
use crate::core::preview::DEFAULT_PREVIEW_CHARS;
use crate::model::Group;

/// Which storage keys hold the thread collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadLayout {
    /// One `threads` key holding every thread.
    #[default]
    Global,
    /// One `threads-<groupId>` key per group.
    PerGroup,
}

/// What to do with a stored document that fails to parse or validate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptPolicy {
    /// Log a warning and treat the document as empty.
    #[default]
    Reset,
    /// Return an error.
    Fail,
}

/// Board configuration (TOML).
///
/// Missing fields fall back to defaults, so an empty file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoardConfig {
    pub thread_layout: ThreadLayout,

    pub on_corrupt: CorruptPolicy,

    /// Characters of thread content shown before truncation in list views.
    pub preview_chars: usize,

    /// Listed groups; replaces the mock catalog.
    pub groups: Vec<Group>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            thread_layout: ThreadLayout::default(),
            on_corrupt: CorruptPolicy::default(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
            groups: MOCK_GROUP_IDS.iter().map(|id| Group::mock(id)).collect(),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.preview_chars == 0 {
            return Err(anyhow!("preview_chars must be > 0"));
        }
        let mut seen = HashSet::new();
        for group in &self.groups {
            if group.id.is_empty() {
                return Err(anyhow!("groups: id must be non-empty"));
            }
            if !seen.insert(group.id.as_str()) {
                return Err(anyhow!("groups: duplicate id '{}'", group.id));
            }
        }
        Ok(())
    }

    pub fn catalog(&self) -> GroupCatalog {
        GroupCatalog::new(self.groups.clone())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BoardConfig::default()`.
pub fn load_config(path: &Path) -> Result<BoardConfig> {
    if !path.exists() {
        let cfg = BoardConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BoardConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &BoardConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf, "toml.tmp")
}
