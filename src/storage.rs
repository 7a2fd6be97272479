//! Key-value persistence for the calculator's client state.
//!
//! The application persists two independent values, the history list and
//! the theme flag. Both go through the [`Storage`] capability, so the core
//! behaves the same against an in-memory map, files on disk, or whatever a
//! different frontend substitutes.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

/// A persistence failure. Callers treat writes as best-effort.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// String-keyed, string-valued persistence, the shape of browser-style
/// client storage.
pub trait Storage {
    /// The value under `key`, `None` when absent or unreadable.
    fn load(&self, key: &str) -> Option<String>;
    /// Write the value under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile storage for tests and `--no-persist` runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by one `<key>.json` file per key inside a root
/// directory. The directory is created on first write.
#[derive(Clone, Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(key, %err, "failed to read persisted value");
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .and_then(|_| fs::write(self.path_for(key), value))
            .map_err(|source| StorageError::Write {
                key: key.to_string(),
                source,
            })
    }
}
