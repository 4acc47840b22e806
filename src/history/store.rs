//! The persistence collaborator.
//!
//! History survives process restarts through a key-value store the
//! engine only ever talks to through the `KeyValueStore` trait. Two
//! implementations ship with the crate:
//!
//! - `InMemoryStore`: a hash map, for tests and store-less embeddings.
//! - `FileStore`: one file per key under a root directory.
//!
//! Store failures are typed (`StoreError`) but never fatal: the
//! `HistoryLog` catches them at its boundary and keeps playing with
//! in-memory state.

use rustc_hash::FxHashMap;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A persistence operation failed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying storage could not be read or written.
    #[error("store i/o failed: {0}")]
    Io(#[from] io::Error),

    /// The stored payload is not the JSON we wrote.
    #[error("stored payload is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Minimal key-value persistence seam.
///
/// Values are opaque strings; the caller owns the encoding. `get` of an
/// absent key is `Ok(None)`, not an error.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Hash-map store for tests and store-less embeddings.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    entries: FxHashMap<String, String>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a value, for tests that need existing history.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-per-key store rooted at a directory.
///
/// The restart-surviving store. Keys map to `<root>/<key>.json`; the
/// root is created on first write.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. Nothing is touched until the
    /// first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}
