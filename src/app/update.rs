// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! `update()` routes each message to a handler in `handlers`:
//!
//! - `handlers::camera`: facing, flash, zoom, filter
//! - `handlers::capture`: take, download, delete current photo
//! - `handlers::gallery`: gallery panel and per-item actions

use crate::app::AppModel;
use crate::app::state::Message;
use crate::backends::camera::MediaCapture;
use crate::errors::AppResult;
use crate::storage::KeyValueStore;
use tracing::debug;

impl<C: MediaCapture, S: KeyValueStore> AppModel<C, S> {
    /// Handle one control event
    ///
    /// Camera problems are logged and absorbed; only storage failures
    /// are returned.
    pub async fn update(&mut self, message: Message) -> AppResult<()> {
        debug!(?message, "Handling message");
        match message {
            // ===== Capture =====
            Message::TakePhoto => self.handle_take_photo(),
            Message::Download => {
                self.handle_download().await;
                Ok(())
            }
            Message::DeleteCurrent => self.handle_delete_current(),

            // ===== Camera =====
            Message::SwitchCamera => {
                self.handle_switch_camera().await;
                Ok(())
            }
            Message::ToggleFlash => {
                self.handle_toggle_flash().await;
                Ok(())
            }
            Message::ZoomIn => {
                self.handle_zoom_step(self.config.zoom_step).await;
                Ok(())
            }
            Message::ZoomOut => {
                self.handle_zoom_step(-self.config.zoom_step).await;
                Ok(())
            }
            Message::SetZoom(value) => {
                self.handle_set_zoom(value).await;
                Ok(())
            }
            Message::SelectFilter(filter) => {
                self.handle_select_filter(filter);
                Ok(())
            }

            // ===== Gallery =====
            Message::OpenGallery => {
                self.ui.gallery_open = true;
                Ok(())
            }
            Message::CloseGallery => {
                self.ui.gallery_open = false;
                Ok(())
            }
            Message::Gallery(action) => self.handle_gallery_action(action).await,
        }
    }
}
