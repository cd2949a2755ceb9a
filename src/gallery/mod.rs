// SPDX-License-Identifier: GPL-3.0-only

//! Persisted photo gallery
//!
//! An ordered list of [`PhotoRecord`]s in capture order. Every mutation is
//! followed by a full overwrite of the stored sequence, so the stored slot
//! always matches what is in memory.

pub mod view;

use crate::errors::{StorageError, StorageResult};
use crate::pipelines::photo::EncodedImage;
use crate::storage::{GalleryPersistence, KeyValueStore};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A captured photo. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Unique within the gallery, increasing with capture time
    pub id: u64,
    /// Self-contained encoded payload (data URI)
    pub data: String,
    /// Creation time, ISO-8601 in UTC
    pub timestamp: String,
}

/// Hands out photo ids derived from the capture time in milliseconds
///
/// Two captures within the same millisecond (or a clock stepping backwards)
/// would reuse an id; the generator bumps past the last id it handed out
/// instead, so ids stay unique and increasing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoIdGenerator {
    last: Option<u64>,
}

impl PhotoIdGenerator {
    /// Continue after the largest id already in use
    pub fn seeded(records: &[PhotoRecord]) -> Self {
        Self {
            last: records.iter().map(|r| r.id).max(),
        }
    }

    /// Next id at `now`; `None` once the last id handed out is `u64::MAX`
    pub fn next_id(&mut self, now: DateTime<Utc>) -> Option<u64> {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = match self.last {
            Some(last) if candidate <= last => last.checked_add(1)?,
            _ => candidate,
        };
        self.last = Some(id);
        Some(id)
    }
}

/// The gallery store
pub struct Gallery<S> {
    records: Vec<PhotoRecord>,
    persistence: GalleryPersistence<S>,
    ids: PhotoIdGenerator,
}

impl<S: KeyValueStore> Gallery<S> {
    /// An empty gallery backed by `persistence`. Call [`Gallery::load`] once at startup.
    pub fn new(persistence: GalleryPersistence<S>) -> Self {
        Self {
            records: Vec::new(),
            persistence,
            ids: PhotoIdGenerator::default(),
        }
    }

    /// Replace the in-memory sequence with the stored one
    pub fn load(&mut self) -> StorageResult<()> {
        self.records = self.persistence.load()?;
        self.ids = PhotoIdGenerator::seeded(&self.records);
        Ok(())
    }

    /// Append a new photo captured now
    pub fn add(&mut self, image: EncodedImage) -> StorageResult<PhotoRecord> {
        self.add_at(image, Utc::now())
    }

    /// Append a new photo captured at `now`
    ///
    /// If the write fails the record is dropped again and the error returned.
    pub fn add_at(&mut self, image: EncodedImage, now: DateTime<Utc>) -> StorageResult<PhotoRecord> {
        let Some(id) = self.ids.next_id(now) else {
            warn!(count = self.records.len(), "Photo ids exhausted");
            return Err(StorageError::IdsExhausted);
        };
        let record = PhotoRecord {
            id,
            data: image.into_payload(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.records.push(record.clone());

        if let Err(err) = self.persist() {
            self.records.pop();
            return Err(err);
        }

        info!(id = record.id, count = self.records.len(), "Photo added to gallery");
        Ok(record)
    }

    /// Remove the most recent photo. Empty galleries are left untouched and not written.
    pub fn remove_last(&mut self) -> StorageResult<Option<PhotoRecord>> {
        let Some(removed) = self.records.pop() else {
            debug!("Gallery empty, nothing to remove");
            return Ok(None);
        };

        if let Err(err) = self.persist() {
            self.records.push(removed);
            return Err(err);
        }

        info!(id = removed.id, count = self.records.len(), "Removed last photo");
        Ok(Some(removed))
    }

    /// Remove the photo with `id`. Returns whether one was removed.
    pub fn remove_by_id(&mut self, id: u64) -> StorageResult<bool> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            debug!(id, "No photo with this id");
            return Ok(false);
        };
        let removed = self.records.remove(index);

        if let Err(err) = self.persist() {
            self.records.insert(index, removed);
            return Err(err);
        }

        info!(id, count = self.records.len(), "Removed photo");
        Ok(true)
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&PhotoRecord> {
        self.records.last()
    }

    pub fn get(&self, id: u64) -> Option<&PhotoRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn persistence(&self) -> &GalleryPersistence<S> {
        &self.persistence
    }

    fn persist(&self) -> StorageResult<()> {
        self.persistence.save(&self.records)
    }
}
