// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the media-capture abstraction

use std::sync::Arc;
use tracing::warn;

/// Which physical camera a stream is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FacingMode {
    /// Front camera, facing the user
    User,
    /// Back camera, facing the scene
    #[default]
    Environment,
}

impl FacingMode {
    pub fn from_front(front: bool) -> Self {
        if front {
            FacingMode::User
        } else {
            FacingMode::Environment
        }
    }

    pub fn is_front(&self) -> bool {
        matches!(self, FacingMode::User)
    }

    /// Constraint value understood by media-capture services
    pub fn as_constraint(&self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_constraint())
    }
}

/// Video part of a stream request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoConstraints {
    pub facing_mode: FacingMode,
}

/// What to ask the media-capture service for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConstraints {
    pub video: Option<VideoConstraints>,
    pub audio: bool,
}

impl StreamConstraints {
    /// Video only, from the given camera
    pub fn camera(facing_mode: FacingMode) -> Self {
        Self {
            video: Some(VideoConstraints { facing_mode }),
            audio: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
}

/// Device-reported zoom range
///
/// Only built through [`ZoomRange::new`], so the bounds are always finite
/// with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    min: f64,
    max: f64,
    step: f64,
}

impl ZoomRange {
    /// Validated range; `None` if the bounds are not finite or inverted
    pub fn new(min: f64, max: f64, step: f64) -> Option<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            warn!(min, max, "Ignoring invalid zoom range");
            return None;
        }
        let step = if step.is_finite() && step > 0.0 { step } else { 0.0 };
        Some(Self { min, max, step })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Slider granularity, 0.0 if the device did not report one
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Nearest value inside the range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Whether the range allows any movement at all
    pub fn is_adjustable(&self) -> bool {
        self.max > self.min
    }
}

/// Adjustable properties reported by the active video track
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StreamCapabilities {
    pub zoom: Option<ZoomRange>,
    pub torch: bool,
}

/// A single constraint change for the active video track
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintPatch {
    Zoom(f64),
    Torch(bool),
}

/// The currently rendered video frame (RGBA, tightly packed)
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
}

impl CameraFrame {
    /// A frame filled with one color
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = (width as usize) * (height as usize);
        let data: Vec<u8> = rgba.iter().copied().cycle().take(pixels * 4).collect();
        Self {
            width,
            height,
            data: Arc::from(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_mode_constraints() {
        assert_eq!(FacingMode::from_front(true).as_constraint(), "user");
        assert_eq!(FacingMode::from_front(false).as_constraint(), "environment");
        assert!(!StreamConstraints::camera(FacingMode::User).audio);
    }

    #[test]
    fn test_zoom_range_clamp() {
        let range = ZoomRange::new(1.0, 4.0, 0.1).unwrap();
        assert_eq!(range.clamp(0.2), 1.0);
        assert_eq!(range.clamp(9.0), 4.0);
        assert_eq!(range.clamp(2.5), 2.5);
    }

    #[test]
    fn test_invalid_zoom_ranges() {
        assert!(ZoomRange::new(4.0, 1.0, 0.1).is_none());
        assert!(ZoomRange::new(f64::NAN, 1.0, 0.1).is_none());
        assert!(ZoomRange::new(1.0, f64::NAN, 0.1).is_none());
        assert!(ZoomRange::new(1.0, f64::INFINITY, 0.1).is_none());
        assert_eq!(ZoomRange::new(1.0, 2.0, -1.0).unwrap().step(), 0.0);
        assert!(!ZoomRange::new(1.0, 1.0, 0.1).unwrap().is_adjustable());
    }

    #[test]
    fn test_solid_frame_size() {
        let frame = CameraFrame::solid(3, 2, [1, 2, 3, 255]);
        assert_eq!(frame.data.len(), 24);
        assert_eq!(&frame.data[4..8], &[1, 2, 3, 255]);
    }
}
