//! Test-only helpers for constructing threads, replies and boards.

use anyhow::{Result, anyhow};
use tempfile::TempDir;

use crate::board::Board;
use crate::core::ids::IdSource;
use crate::io::config::{BoardConfig, load_config, write_config};
use crate::io::init::{BoardPaths, InitOptions, init_board};
use crate::io::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::model::{Reply, Thread};

/// Deterministic ids `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u32,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

pub fn reply(id: &str, content: &str) -> Reply {
    Reply {
        id: id.to_string(),
        content: content.to_string(),
    }
}

/// Create a deterministic thread with no replies.
pub fn thread(id: &str, group_id: &str) -> Thread {
    Thread {
        id: id.to_string(),
        group_id: group_id.to_string(),
        title: format!("{} title", id),
        content: format!("{} content", id),
        image: None,
        replies: Vec::new(),
    }
}

pub fn thread_with_replies(id: &str, group_id: &str, replies: Vec<Reply>) -> Thread {
    Thread {
        replies,
        ..thread(id, group_id)
    }
}

/// Storage that serves a fixed snapshot and fails every write.
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

impl ReadOnlyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self { inner }
    }
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("disk full: cannot write {key}"))
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.inner.keys()
    }
}

/// Board over fresh in-memory storage with sequential `id-N` ids.
pub fn memory_board(config: &BoardConfig) -> Board<MemoryStore, SequentialIds> {
    Board::open_with_ids(MemoryStore::new(), config, SequentialIds::new("id"))
        .expect("open memory board")
}

/// Initialized data directory in a temp dir, removed on drop.
pub struct TempBoard {
    _temp: TempDir,
    paths: BoardPaths,
}

impl TempBoard {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir()?;
        let paths = init_board(&temp.path().join("data"), &InitOptions { force: false })?;
        Ok(Self { _temp: temp, paths })
    }

    pub fn paths(&self) -> &BoardPaths {
        &self.paths
    }

    pub fn write_config(&self, config: &BoardConfig) -> Result<()> {
        write_config(&self.paths.config_path, config)
    }

    /// Open the board the way the CLI does, with sequential ids.
    pub fn open(&self, prefix: &str) -> Result<Board<FileStore, SequentialIds>> {
        let config = load_config(&self.paths.config_path)?;
        let store = FileStore::open(&self.paths.storage_path)?;
        Board::open_with_ids(store, &config, SequentialIds::new(prefix))
    }
}
