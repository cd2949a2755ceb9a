// SPDX-License-Identifier: GPL-3.0-only

//! Camera widget core
//!
//! The state layer of a camera capture widget: a live preview with
//! facing-mode switching, zoom, torch and cosmetic filters, plus a small
//! gallery of captured photos persisted in a local key-value store.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: display controller (control events in, control visuals out)
//! - [`session`]: capture session owning the single live stream
//! - [`gallery`]: persisted photo gallery and its view projection
//! - [`storage`]: key-value persistence adapter
//! - [`backends`]: media-capture abstraction and the in-process virtual camera
//! - [`pipelines`]: photo encoding and downloads
//! - [`config`]: user configuration handling
//!
//! Platform capabilities (camera, frame encoding, storage, file saving)
//! are traits, so the same controller runs in a browser host, a native
//! host or a test.
//!
//! # Example
//!
//! ```ignore
//! let mut app = AppModel::from_config(Config::load(), camera, FileStore::in_data_dir()?);
//! app.init().await?;
//! app.update(Message::TakePhoto).await?;
//! let badge = app.controls().badge;
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod gallery;
pub mod pipelines;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use app::{AppModel, ControlsView, FilterType, Message, SessionState};
pub use config::Config;
pub use errors::{AppError, AppResult, CameraError, ConstraintStatus, StorageError};
pub use gallery::{Gallery, PhotoRecord};
pub use session::CaptureSession;

/// Install the global `tracing` subscriber
///
/// The `RUST_LOG` environment variable controls the log level, falling back
/// to `default_filter` (e.g. `"warn"`, `"camera_widget=debug"`). Calling it
/// more than once keeps the first subscriber.
pub fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(true)
        .with_level(true)
        .try_init();
}
