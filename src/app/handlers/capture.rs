// SPDX-License-Identifier: GPL-3.0-only

//! Capture handlers
//!
//! Taking a photo, downloading it and undoing the last capture.

use crate::app::AppModel;
use crate::backends::camera::MediaCapture;
use crate::constants::timing;
use crate::errors::AppResult;
use crate::gallery::PhotoRecord;
use crate::pipelines::download::download_filename;
use crate::storage::KeyValueStore;
use std::time::Instant;
use tracing::{debug, error, info, warn};

impl<C: MediaCapture, S: KeyValueStore> AppModel<C, S> {
    /// Encode the current frame and add it to the gallery
    ///
    /// Without a bound preview, or if the frame cannot be captured, nothing
    /// happens. A failed gallery write is returned.
    pub(crate) fn handle_take_photo(&mut self) -> AppResult<()> {
        if !self.preview.bound {
            debug!("No preview bound, capture disabled");
            return Ok(());
        }

        let image = match self.session.capture_frame() {
            Ok(image) => image,
            Err(err) => {
                warn!(error = %err, "Photo capture failed");
                return Ok(());
            }
        };

        let record = self.gallery.add(image)?;
        info!(id = record.id, count = self.gallery.count(), "Photo taken");
        self.ui.current_photo = Some(record);
        self.ui.download_feedback_until = None;
        Ok(())
    }

    pub(crate) async fn handle_download(&mut self) {
        let Some(record) = self.ui.current_photo.clone() else {
            debug!("No photo to download");
            return;
        };

        if self.save_photo(&record).await {
            self.ui.download_feedback_until = Some(Instant::now() + timing::DOWNLOAD_FEEDBACK);
        }
    }

    /// Remove the most recent capture
    ///
    /// Only acts while a photo from this session is on display; older
    /// gallery photos are deleted from the gallery panel.
    pub(crate) fn handle_delete_current(&mut self) -> AppResult<()> {
        if self.ui.current_photo.is_none() {
            debug!("No photo on display, nothing to delete");
            return Ok(());
        }
        if let Some(removed) = self.gallery.remove_last()? {
            info!(id = removed.id, "Deleted last photo");
        }
        self.ui.current_photo = None;
        self.ui.download_feedback_until = None;
        Ok(())
    }

    /// Hand a photo to the file saver; returns whether it was saved
    pub(crate) async fn save_photo(&self, record: &PhotoRecord) -> bool {
        let filename = download_filename(record);
        match self.saver.save(&record.data, &filename).await {
            Ok(()) => {
                info!(id = record.id, filename = %filename, "Photo download started");
                true
            }
            Err(err) => {
                error!(id = record.id, error = %err, "Photo download failed");
                false
            }
        }
    }
}
