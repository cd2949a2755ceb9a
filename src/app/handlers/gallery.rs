// SPDX-License-Identifier: GPL-3.0-only

//! Gallery item handlers

use crate::app::AppModel;
use crate::backends::camera::MediaCapture;
use crate::errors::AppResult;
use crate::gallery::view::GalleryAction;
use crate::storage::KeyValueStore;
use tracing::warn;

impl<C: MediaCapture, S: KeyValueStore> AppModel<C, S> {
    pub(crate) async fn handle_gallery_action(&mut self, action: GalleryAction) -> AppResult<()> {
        match action {
            GalleryAction::Download(id) => {
                let Some(record) = self.gallery.get(id).cloned() else {
                    warn!(id, "Download requested for unknown photo");
                    return Ok(());
                };
                self.save_photo(&record).await;
            }
            GalleryAction::Delete(id) => {
                let removed = self.gallery.remove_by_id(id)?;
                if removed && self.ui.current_photo.as_ref().is_some_and(|p| p.id == id) {
                    self.ui.current_photo = None;
                    self.ui.download_feedback_until = None;
                }
            }
        }
        Ok(())
    }
}
