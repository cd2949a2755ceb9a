// SPDX-License-Identifier: GPL-3.0-only

//! Capture session
//!
//! Owns the one live camera stream. The session provides:
//! - Stream lifecycle (start with a facing mode, stop, restart)
//! - Best-effort zoom and torch constraints on the video track
//! - Encoding of the currently rendered frame
//!
//! A previous stream's tracks are always stopped before a new stream is
//! requested, so no camera is left locked. `start` takes `&mut self`, which
//! serializes restarts: a second start cannot begin before the first one
//! has bound (or failed to bind) its stream.

use crate::backends::camera::{
    ConstraintPatch, FacingMode, MediaCapture, StreamCapabilities, StreamConstraints, StreamHandle,
};
use crate::errors::{CameraError, CameraResult, Constraint, ConstraintStatus};
use crate::pipelines::photo::{EncodedImage, FrameEncoder};
use tracing::{debug, error, info, warn};

struct ActiveStream {
    stream: Box<dyn StreamHandle>,
    facing: FacingMode,
    capabilities: StreamCapabilities,
}

pub struct CaptureSession<C> {
    capture: C,
    encoder: Box<dyn FrameEncoder>,
    active: Option<ActiveStream>,
}

impl<C> CaptureSession<C> {
    /// Stop every track of the active stream and unbind it. Idempotent.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            for track in active.stream.tracks() {
                track.stop();
            }
            info!(facing = %active.facing, "Camera stream stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Facing mode of the bound stream
    pub fn facing(&self) -> Option<FacingMode> {
        self.active.as_ref().map(|active| active.facing)
    }

    /// Capabilities of the bound stream's video track
    pub fn capabilities(&self) -> Option<StreamCapabilities> {
        self.active.as_ref().map(|active| active.capabilities)
    }

    pub fn media_capture(&self) -> &C {
        &self.capture
    }

    /// Encode the currently rendered frame of the active stream
    pub fn capture_frame(&self) -> CameraResult<EncodedImage> {
        let active = self.active.as_ref().ok_or(CameraError::NoActiveStream)?;
        let frame = active
            .stream
            .current_frame()
            .ok_or(CameraError::NoActiveStream)?;
        self.encoder.encode(&frame)
    }

    /// Zoom the active track, clamped to its reported range
    ///
    /// Never fails: an absent capability or stream is a no-op and a
    /// rejected change leaves the stream untouched. The returned status
    /// says which of those happened.
    pub async fn set_zoom(&self, value: f64) -> ConstraintStatus {
        let Some(active) = self.active.as_ref() else {
            return ConstraintStatus::NoActiveStream;
        };
        let Some(range) = active.capabilities.zoom else {
            debug!("Zoom not supported by this camera");
            return ConstraintStatus::Unsupported;
        };
        if value.is_nan() {
            warn!("Ignoring NaN zoom value");
            return ConstraintStatus::Failed("zoom value is not a number".to_string());
        }

        let zoom = range.clamp(value);
        let status = Self::apply(active, ConstraintPatch::Zoom(zoom), Constraint::Zoom, zoom).await;
        if status.is_applied() {
            debug!(requested = value, applied = zoom, "Zoom applied");
        }
        status
    }

    /// Turn the torch on or off; same best-effort policy as [`Self::set_zoom`]
    pub async fn set_torch(&self, enabled: bool) -> ConstraintStatus {
        let Some(active) = self.active.as_ref() else {
            return ConstraintStatus::NoActiveStream;
        };
        if !active.capabilities.torch {
            debug!("Torch not supported by this camera");
            return ConstraintStatus::Unsupported;
        }

        let value = if enabled { 1.0 } else { 0.0 };
        let status =
            Self::apply(active, ConstraintPatch::Torch(enabled), Constraint::Torch, value).await;
        if status.is_applied() {
            info!(enabled, "Torch applied");
        }
        status
    }

    async fn apply(
        active: &ActiveStream,
        patch: ConstraintPatch,
        constraint: Constraint,
        value: f64,
    ) -> ConstraintStatus {
        let Some(track) = active.stream.video_track() else {
            return ConstraintStatus::NoActiveStream;
        };
        match track.apply_constraints(patch).await {
            Ok(()) => ConstraintStatus::Applied(value),
            Err(CameraError::ConstraintUnsupported(_)) => {
                debug!(%constraint, "Constraint not supported by track");
                ConstraintStatus::Unsupported
            }
            Err(err) => {
                warn!(%constraint, error = %err, "Failed to apply constraint");
                ConstraintStatus::Failed(err.to_string())
            }
        }
    }
}

impl<C: MediaCapture> CaptureSession<C> {
    pub fn new(capture: C, encoder: Box<dyn FrameEncoder>) -> Self {
        Self {
            capture,
            encoder,
            active: None,
        }
    }

    /// (Re)start the camera, front-facing if `facing_front`
    ///
    /// The current stream, if any, is stopped first. On failure no stream
    /// is bound.
    ///
    /// # Returns
    /// * `Ok(capabilities)` - Stream bound; zoom is `None` if the device has no zoom
    /// * `Err(CameraError)` - Access denied, no device, or backend failure
    pub async fn start(&mut self, facing_front: bool) -> CameraResult<StreamCapabilities> {
        self.stop();

        let facing = FacingMode::from_front(facing_front);
        info!(%facing, "Requesting camera stream");

        let stream = match self
            .capture
            .request_stream(StreamConstraints::camera(facing))
            .await
        {
            Ok(stream) => stream,
            Err(err) => {
                error!(%facing, error = %err, "Failed to access camera");
                return Err(err);
            }
        };

        let capabilities = stream
            .video_track()
            .map(|track| track.capabilities())
            .unwrap_or_default();

        info!(
            %facing,
            zoom = ?capabilities.zoom,
            torch = capabilities.torch,
            "Camera stream bound"
        );

        self.active = Some(ActiveStream {
            stream,
            facing,
            capabilities,
        });
        Ok(capabilities)
    }
}

impl<C> Drop for CaptureSession<C> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::{CameraFrame, ZoomRange};
    use crate::backends::virtual_camera::{CameraEvent, VirtualCamera};
    use crate::pipelines::photo::ImageEncoder;

    fn camera(capabilities: StreamCapabilities) -> VirtualCamera {
        VirtualCamera::new(CameraFrame::solid(4, 4, [200, 100, 50, 255]))
            .with_capabilities(capabilities)
    }

    fn session(camera: &VirtualCamera) -> CaptureSession<VirtualCamera> {
        CaptureSession::new(camera.clone(), Box::new(ImageEncoder::default()))
    }

    fn zoom_caps() -> StreamCapabilities {
        StreamCapabilities {
            zoom: ZoomRange::new(1.0, 5.0, 0.1),
            torch: true,
        }
    }

    #[tokio::test]
    async fn test_restart_stops_previous_stream_first() {
        let camera = camera(StreamCapabilities::default());
        let mut session = session(&camera);

        session.start(false).await.unwrap();
        session.start(true).await.unwrap();

        assert_eq!(camera.live_tracks(), 1);
        assert_eq!(session.facing(), Some(FacingMode::User));
        let events = camera.events();
        let stopped = events
            .iter()
            .position(|e| matches!(e, CameraEvent::TrackStopped { stream: 1, .. }))
            .unwrap();
        let reopened = events
            .iter()
            .position(|e| matches!(e, CameraEvent::StreamOpened { stream: 2, .. }))
            .unwrap();
        assert!(stopped < reopened);
    }

    #[tokio::test]
    async fn test_start_reports_capabilities() {
        let camera = camera(zoom_caps());
        let mut session = session(&camera);
        let caps = session.start(false).await.unwrap();
        assert_eq!(caps.zoom.unwrap().max(), 5.0);
        assert!(caps.torch);
    }

    #[tokio::test]
    async fn test_inverted_zoom_range_means_no_zoom() {
        let camera = camera(StreamCapabilities {
            zoom: ZoomRange::new(4.0, 1.0, 0.1),
            torch: false,
        });
        let mut session = session(&camera);
        let caps = session.start(false).await.unwrap();
        assert_eq!(caps.zoom, None);
        assert_eq!(session.set_zoom(2.0).await, ConstraintStatus::Unsupported);
        assert!(camera.applied_constraints().is_empty());
    }

    #[tokio::test]
    async fn test_failed_start_leaves_nothing_bound() {
        let camera = camera(StreamCapabilities::default());
        let mut session = session(&camera);
        session.start(false).await.unwrap();

        camera.deny_access(CameraError::NoDevice);
        assert_eq!(session.start(true).await, Err(CameraError::NoDevice));
        assert!(!session.is_active());
        assert_eq!(camera.live_tracks(), 0);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let camera = camera(StreamCapabilities::default());
        let mut session = session(&camera);
        session.stop();
        session.start(false).await.unwrap();
        session.stop();
        session.stop();
        assert_eq!(camera.live_tracks(), 0);
    }

    #[tokio::test]
    async fn test_zoom_is_clamped_to_range() {
        let camera = camera(zoom_caps());
        let mut session = session(&camera);
        session.start(false).await.unwrap();

        assert_eq!(session.set_zoom(12.0).await, ConstraintStatus::Applied(5.0));
        assert_eq!(session.set_zoom(-3.0).await, ConstraintStatus::Applied(1.0));
        assert_eq!(session.set_zoom(2.5).await, ConstraintStatus::Applied(2.5));
        assert_eq!(
            camera.applied_constraints(),
            vec![
                ConstraintPatch::Zoom(5.0),
                ConstraintPatch::Zoom(1.0),
                ConstraintPatch::Zoom(2.5)
            ]
        );
    }

    #[tokio::test]
    async fn test_constraints_without_stream_or_capability() {
        let camera = camera(StreamCapabilities::default());
        let mut session = session(&camera);
        assert_eq!(session.set_zoom(2.0).await, ConstraintStatus::NoActiveStream);
        assert_eq!(session.set_torch(true).await, ConstraintStatus::NoActiveStream);

        session.start(false).await.unwrap();
        assert_eq!(session.set_zoom(2.0).await, ConstraintStatus::Unsupported);
        assert_eq!(session.set_torch(true).await, ConstraintStatus::Unsupported);
        assert!(camera.applied_constraints().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_constraint_is_not_fatal() {
        let camera = camera(zoom_caps());
        let mut session = session(&camera);
        session.start(false).await.unwrap();
        camera.set_reject_constraints(true);

        assert!(matches!(
            session.set_torch(true).await,
            ConstraintStatus::Failed(_)
        ));
        assert!(session.is_active());
        assert!(session.capture_frame().is_ok());
    }

    #[tokio::test]
    async fn test_capture_requires_stream() {
        let camera = camera(StreamCapabilities::default());
        let mut session = session(&camera);
        assert_eq!(session.capture_frame(), Err(CameraError::NoActiveStream));

        session.start(false).await.unwrap();
        let image = session.capture_frame().unwrap();
        assert_eq!((image.width, image.height), (4, 4));
        assert!(image.payload().starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn test_drop_releases_camera() {
        let camera = camera(StreamCapabilities::default());
        {
            let mut session = session(&camera);
            session.start(false).await.unwrap();
            assert_eq!(camera.live_tracks(), 1);
        }
        assert_eq!(camera.live_tracks(), 0);
    }
}
