// SPDX-License-Identifier: GPL-3.0-only

//! In-process virtual camera
//!
//! A [`MediaCapture`] service that serves a still frame instead of a
//! device. Hosts without a real camera (headless runs, tests) use it to
//! drive the widget. Capabilities, access failures and constraint
//! rejections are configurable, and every stream/track operation is
//! recorded as a [`CameraEvent`].
//!
//! Cloning a `VirtualCamera` shares its state, so a caller can keep a handle
//! to inspect while the session owns another.

use crate::backends::camera::{
    CameraFrame, ConstraintPatch, FacingMode, MediaCapture, StreamCapabilities, StreamConstraints,
    StreamHandle, TrackHandle, TrackKind,
};
use crate::errors::{CameraError, CameraResult, Constraint};
use futures::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info};

/// Something that happened to the virtual device
#[derive(Debug, Clone, PartialEq)]
pub enum CameraEvent {
    StreamOpened { stream: u64, facing: FacingMode },
    TrackStopped { stream: u64, kind: TrackKind },
    ConstraintApplied { stream: u64, patch: ConstraintPatch },
    ConstraintRejected { stream: u64, patch: ConstraintPatch },
}

struct Shared {
    frame: RefCell<CameraFrame>,
    capabilities: Cell<StreamCapabilities>,
    /// Error returned by the next stream requests, if set
    access_error: RefCell<Option<CameraError>>,
    reject_constraints: Cell<bool>,
    events: RefCell<Vec<CameraEvent>>,
    next_stream: Cell<u64>,
    live_tracks: Cell<usize>,
}

impl Shared {
    fn record(&self, event: CameraEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[derive(Clone)]
pub struct VirtualCamera {
    shared: Rc<Shared>,
}

impl VirtualCamera {
    /// A camera serving `frame`, with no zoom or torch capability
    pub fn new(frame: CameraFrame) -> Self {
        Self {
            shared: Rc::new(Shared {
                frame: RefCell::new(frame),
                capabilities: Cell::new(StreamCapabilities::default()),
                access_error: RefCell::new(None),
                reject_constraints: Cell::new(false),
                events: RefCell::new(Vec::new()),
                next_stream: Cell::new(1),
                live_tracks: Cell::new(0),
            }),
        }
    }

    pub fn with_capabilities(self, capabilities: StreamCapabilities) -> Self {
        self.shared.capabilities.set(capabilities);
        self
    }

    /// Capabilities reported by streams opened from now on
    pub fn set_capabilities(&self, capabilities: StreamCapabilities) {
        self.shared.capabilities.set(capabilities);
    }

    pub fn set_frame(&self, frame: CameraFrame) {
        *self.shared.frame.borrow_mut() = frame;
    }

    /// Fail stream requests with `error` until [`VirtualCamera::allow_access`]
    pub fn deny_access(&self, error: CameraError) {
        *self.shared.access_error.borrow_mut() = Some(error);
    }

    pub fn allow_access(&self) {
        *self.shared.access_error.borrow_mut() = None;
    }

    /// Make advertised constraints fail when applied
    pub fn set_reject_constraints(&self, reject: bool) {
        self.shared.reject_constraints.set(reject);
    }

    pub fn events(&self) -> Vec<CameraEvent> {
        self.shared.events.borrow().clone()
    }

    /// Tracks opened and not yet stopped
    pub fn live_tracks(&self) -> usize {
        self.shared.live_tracks.get()
    }

    /// Constraint values applied so far, in order
    pub fn applied_constraints(&self) -> Vec<ConstraintPatch> {
        self.shared
            .events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                CameraEvent::ConstraintApplied { patch, .. } => Some(*patch),
                _ => None,
            })
            .collect()
    }
}

impl MediaCapture for VirtualCamera {
    fn request_stream(
        &self,
        constraints: StreamConstraints,
    ) -> LocalBoxFuture<'_, CameraResult<Box<dyn StreamHandle>>> {
        Box::pin(async move {
            if let Some(error) = self.shared.access_error.borrow().clone() {
                debug!(%error, "Virtual camera refusing stream");
                return Err(error);
            }
            let Some(video) = constraints.video else {
                return Err(CameraError::Backend("No video track requested".to_string()));
            };

            let id = self.shared.next_stream.get();
            self.shared.next_stream.set(id + 1);

            let mut kinds = vec![TrackKind::Video];
            if constraints.audio {
                kinds.push(TrackKind::Audio);
            }
            let tracks: Vec<VirtualTrack> = kinds
                .into_iter()
                .map(|kind| VirtualTrack {
                    stream: id,
                    kind,
                    capabilities: self.shared.capabilities.get(),
                    stopped: Cell::new(false),
                    shared: Rc::clone(&self.shared),
                })
                .collect();

            self.shared
                .live_tracks
                .set(self.shared.live_tracks.get() + tracks.len());
            self.shared.record(CameraEvent::StreamOpened {
                stream: id,
                facing: video.facing_mode,
            });
            info!(stream = id, facing = %video.facing_mode, "Virtual camera stream opened");

            Ok(Box::new(VirtualStream {
                tracks,
                shared: Rc::clone(&self.shared),
            }) as Box<dyn StreamHandle>)
        })
    }
}

struct VirtualStream {
    tracks: Vec<VirtualTrack>,
    shared: Rc<Shared>,
}

impl StreamHandle for VirtualStream {
    fn tracks(&self) -> Vec<&dyn TrackHandle> {
        self.tracks
            .iter()
            .map(|track| track as &dyn TrackHandle)
            .collect()
    }

    fn current_frame(&self) -> Option<CameraFrame> {
        let rendering = self
            .tracks
            .iter()
            .any(|track| track.kind == TrackKind::Video && !track.stopped.get());
        rendering.then(|| self.shared.frame.borrow().clone())
    }
}

struct VirtualTrack {
    stream: u64,
    kind: TrackKind,
    capabilities: StreamCapabilities,
    stopped: Cell<bool>,
    shared: Rc<Shared>,
}

impl TrackHandle for VirtualTrack {
    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn stop(&self) {
        if self.stopped.replace(true) {
            return;
        }
        self.shared
            .live_tracks
            .set(self.shared.live_tracks.get().saturating_sub(1));
        self.shared.record(CameraEvent::TrackStopped {
            stream: self.stream,
            kind: self.kind,
        });
    }

    fn capabilities(&self) -> StreamCapabilities {
        match self.kind {
            TrackKind::Video => self.capabilities,
            TrackKind::Audio => StreamCapabilities::default(),
        }
    }

    fn apply_constraints(&self, patch: ConstraintPatch) -> LocalBoxFuture<'_, CameraResult<()>> {
        Box::pin(async move {
            if self.stopped.get() {
                return Err(CameraError::Backend("Track has ended".to_string()));
            }

            let capabilities = self.capabilities();
            let constraint = match patch {
                ConstraintPatch::Zoom(_) => Constraint::Zoom,
                ConstraintPatch::Torch(_) => Constraint::Torch,
            };
            let supported = match constraint {
                Constraint::Zoom => capabilities.zoom.is_some(),
                Constraint::Torch => capabilities.torch,
            };
            if !supported {
                return Err(CameraError::ConstraintUnsupported(constraint));
            }

            if self.shared.reject_constraints.get() {
                self.shared.record(CameraEvent::ConstraintRejected {
                    stream: self.stream,
                    patch,
                });
                return Err(CameraError::ConstraintFailed {
                    constraint,
                    reason: "OverconstrainedError".to_string(),
                });
            }

            self.shared.record(CameraEvent::ConstraintApplied {
                stream: self.stream,
                patch,
            });
            Ok(())
        })
    }
}
