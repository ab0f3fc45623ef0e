//! Key-value persistence port and its implementations.
//!
//! The port mirrors browser local storage: string keys, string values, every
//! write replaces the whole value.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::debug;

use super::atomic::write_atomic;

/// Synchronous key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Replace the value under `key`. On error the previous value is kept.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// All keys in ascending order.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Volatile storage, used by tests and throwaway sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Storage backed by a single JSON object file (`{"key": "value", ...}`).
///
/// The whole file is read on open and rewritten atomically (temp file +
/// rename) after every mutation. The in-memory map only changes once the
/// rewrite succeeded.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open storage at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read storage {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("parse storage {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), keys = entries.len(), "storage opened");
        Ok(Self { path, entries })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let mut buf = serde_json::to_string_pretty(entries).context("serialize storage")?;
        buf.push('\n');
        write_atomic(&self.path, &buf, "json.tmp")
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        debug!(key, bytes = value.len(), "storage set");
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Single-threaded shared handle so several stores can use one port.
#[derive(Debug, Default)]
pub struct SharedStore<S> {
    inner: Rc<RefCell<S>>,
}

impl<S> SharedStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(store)),
        }
    }

    /// Run `f` with read access to the underlying store.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&*self.inner.borrow())
    }
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> KeyValueStore for SharedStore<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.inner.borrow_mut().set(key, value)
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.inner.borrow().keys()
    }
}
