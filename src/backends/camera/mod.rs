// SPDX-License-Identifier: GPL-3.0-only

//! Media-capture abstraction
//!
//! The widget never talks to a camera directly. Hosts provide a
//! [`MediaCapture`] service (browser `getUserMedia`, a native camera stack,
//! or the in-process [`crate::backends::virtual_camera::VirtualCamera`]).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   Display Controller│
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │   CaptureSession    │  ← Owns the single active stream
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ MediaCapture trait  │  ← requestStream / tracks / constraints
//! └─────────────────────┘
//! ```
//!
//! All futures are local: the widget runs on a single-threaded event loop.

pub mod types;

pub use types::*;

use crate::errors::CameraResult;
use futures::future::LocalBoxFuture;

/// Hands out live camera streams
pub trait MediaCapture {
    /// Request a new stream matching `constraints`
    ///
    /// # Returns
    /// * `Ok(stream)` - Stream acquired, its tracks are live
    /// * `Err(CameraError::AccessDenied | CameraError::NoDevice)` - No camera for us
    fn request_stream(
        &self,
        constraints: StreamConstraints,
    ) -> LocalBoxFuture<'_, CameraResult<Box<dyn StreamHandle>>>;
}

/// A live stream and its tracks
pub trait StreamHandle {
    fn tracks(&self) -> Vec<&dyn TrackHandle>;

    /// The stream's video track, if it has one
    fn video_track(&self) -> Option<&dyn TrackHandle> {
        self.tracks()
            .into_iter()
            .find(|track| track.kind() == TrackKind::Video)
    }

    /// The frame currently rendered from this stream, if any
    fn current_frame(&self) -> Option<CameraFrame>;
}

/// One media track of a stream
pub trait TrackHandle {
    fn kind(&self) -> TrackKind;

    /// Release the device. Stopping twice is harmless.
    fn stop(&self);

    fn capabilities(&self) -> StreamCapabilities;

    fn apply_constraints(&self, patch: ConstraintPatch) -> LocalBoxFuture<'_, CameraResult<()>>;
}
