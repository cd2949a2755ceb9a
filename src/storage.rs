// SPDX-License-Identifier: GPL-3.0-only

//! Local key-value persistence for the gallery
//!
//! The gallery is stored as one JSON array under a single named slot.
//! [`KeyValueStore`] abstracts the slot store so the widget can sit on top
//! of browser local storage, a directory of files ([`FileStore`]) or plain
//! memory ([`MemoryStore`]).

use crate::config::APP_DIR_NAME;
use crate::errors::{StorageError, StorageResult};
use crate::gallery::PhotoRecord;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

/// String slots addressed by key
///
/// Methods take `&self`; implementations use interior mutability.
pub trait KeyValueStore {
    /// Read a slot. `Ok(None)` when the slot was never written.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite a slot
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory store, optionally limited to a byte quota
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes whose value exceeds `bytes`, like a full local storage
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Number of successful `set` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.quota.is_some_and(|quota| value.len() > quota) {
            return Err(StorageError::QuotaExceeded);
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// One file per slot inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data dir (`<data dir>/camera-widget`)
    pub fn in_data_dir() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .ok_or_else(|| StorageError::Io("No data directory available".to_string()))?;
        Ok(Self::new(base.join(APP_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match std::fs::read_to_string(self.slot_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(key);
        // Write then rename; the slot never holds a partial value
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), bytes = value.len(), "Slot written");
        Ok(())
    }
}

/// Reads and writes the gallery sequence under its slot
#[derive(Debug, Clone)]
pub struct GalleryPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> GalleryPersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored records, or an empty sequence if the slot is empty
    pub fn load(&self) -> StorageResult<Vec<PhotoRecord>> {
        match self.store.get(&self.key)? {
            Some(json) => {
                let records: Vec<PhotoRecord> = serde_json::from_str(&json)?;
                info!(key = %self.key, count = records.len(), "Gallery loaded");
                Ok(records)
            }
            None => {
                debug!(key = %self.key, "No stored gallery");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the slot with the full sequence
    pub fn save(&self, records: &[PhotoRecord]) -> StorageResult<()> {
        let json = serde_json::to_string(records)?;
        self.store.set(&self.key, &json)?;
        debug!(key = %self.key, count = records.len(), "Gallery saved");
        Ok(())
    }
}
