// SPDX-License-Identifier: GPL-3.0-only

//! Display controller
//!
//! Bridges control events to the capture session and the gallery, and
//! reflects the resulting state back into what the controls show.
//!
//! # Architecture
//!
//! - `state`: controller state types (SessionState, FilterType, Message, ...)
//! - `update`: message dispatch
//! - `handlers`: per-domain message handlers
//! - `view`: projection of the state into control visuals
//!
//! All state lives in [`AppModel`]; handlers receive it explicitly, so
//! the controller runs without any UI toolkit.

mod handlers;
mod state;
mod update;
mod view;

pub use state::{FilterType, Message, PreviewState, SessionState, UiState};
pub use view::{ControlsView, FilterButton, ZoomControl};

use crate::backends::camera::MediaCapture;
use crate::config::Config;
use crate::errors::AppResult;
use crate::gallery::Gallery;
use crate::pipelines::download::{DirectorySaver, FileSaver};
use crate::pipelines::photo::{FrameEncoder, ImageEncoder};
use crate::session::CaptureSession;
use crate::storage::{GalleryPersistence, KeyValueStore};
use tracing::info;

/// The widget's controller state
pub struct AppModel<C, S> {
    pub(crate) config: Config,
    pub(crate) session: CaptureSession<C>,
    pub(crate) gallery: Gallery<S>,
    pub(crate) saver: Box<dyn FileSaver>,
    pub(crate) state: SessionState,
    pub(crate) preview: PreviewState,
    pub(crate) ui: UiState,
}

impl<C: MediaCapture, S: KeyValueStore> AppModel<C, S> {
    pub fn new(
        config: Config,
        capture: C,
        encoder: Box<dyn FrameEncoder>,
        store: S,
        saver: Box<dyn FileSaver>,
    ) -> Self {
        let persistence = GalleryPersistence::new(store, config.storage_key.clone());
        Self {
            state: SessionState::new(config.start_facing_front),
            session: CaptureSession::new(capture, encoder),
            gallery: Gallery::new(persistence),
            saver,
            preview: PreviewState::default(),
            ui: UiState::default(),
            config,
        }
    }

    /// Controller with the encoder and download directory taken from `config`
    pub fn from_config(config: Config, capture: C, store: S) -> Self {
        let encoder = ImageEncoder::new(config.photo_format.into())
            .with_jpeg_quality(config.jpeg_quality);
        let saver = DirectorySaver::new(config.download_dir());
        Self::new(config, capture, Box::new(encoder), store, Box::new(saver))
    }

    /// Start the camera and load the stored gallery
    ///
    /// A camera failure only leaves the preview unbound; a storage failure
    /// is returned.
    pub async fn init(&mut self) -> AppResult<()> {
        info!(facing_front = self.state.facing_front, "Initializing camera widget");
        self.restart_camera().await;
        self.gallery.load()?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn gallery(&self) -> &Gallery<S> {
        &self.gallery
    }

    pub fn session(&self) -> &CaptureSession<C> {
        &self.session
    }
}
