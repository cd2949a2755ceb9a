// SPDX-License-Identifier: GPL-3.0-only

//! Controller state types

use crate::backends::camera::StreamCapabilities;
use crate::constants::{filters, labels, zoom};
use crate::errors::{Constraint, ConstraintStatus};
use crate::gallery::PhotoRecord;
use crate::gallery::view::GalleryAction;
use std::time::Instant;

/// Display-layer preview filter
///
/// Only changes how the preview is drawn; captured photos are stored
/// unfiltered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterType {
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
    Blur,
}

impl FilterType {
    /// All filters in picker order
    pub const ALL: [FilterType; 5] = [
        FilterType::None,
        FilterType::Grayscale,
        FilterType::Sepia,
        FilterType::Invert,
        FilterType::Blur,
    ];

    /// Filter expression applied to the preview element
    pub fn css_filter(&self) -> &'static str {
        match self {
            FilterType::None => filters::NONE,
            FilterType::Grayscale => filters::GRAYSCALE,
            FilterType::Sepia => filters::SEPIA,
            FilterType::Invert => filters::INVERT,
            FilterType::Blur => filters::BLUR,
        }
    }

    /// Name used for the filter control
    pub fn name(&self) -> &'static str {
        match self {
            FilterType::None => "none",
            FilterType::Grayscale => "grayscale",
            FilterType::Sepia => "sepia",
            FilterType::Invert => "invert",
            FilterType::Blur => "blur",
        }
    }
}

/// User-controlled session state. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionState {
    pub facing_front: bool,
    pub zoom: f64,
    pub filter: FilterType,
    pub flash_on: bool,
}

impl SessionState {
    pub fn new(facing_front: bool) -> Self {
        Self {
            facing_front,
            ..Self::default()
        }
    }

    /// Label of the facing toggle: names the camera a click switches to
    pub fn facing_label(&self) -> &'static str {
        if self.facing_front {
            labels::SWITCH_TO_BACK
        } else {
            labels::SWITCH_TO_FRONT
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            facing_front: false,
            zoom: zoom::DEFAULT,
            filter: FilterType::None,
            flash_on: false,
        }
    }
}

/// What the bound stream allows, as seen by the controls
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PreviewState {
    /// A stream is bound and rendering
    pub bound: bool,
    pub capabilities: StreamCapabilities,
}

impl PreviewState {
    /// Zoom bounds for stepping; `1.0..=1.0` without a zoom capability
    pub fn zoom_bounds(&self) -> (f64, f64) {
        match self.capabilities.zoom {
            Some(range) => (range.min(), range.max()),
            None => (zoom::FALLBACK_MIN, zoom::FALLBACK_MAX),
        }
    }

    pub fn clamp_zoom(&self, value: f64) -> f64 {
        let (min, max) = self.zoom_bounds();
        value.clamp(min, max)
    }
}

/// Transient UI-only state
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub gallery_open: bool,
    /// Photo shown in the photo display, taken during this session
    pub current_photo: Option<PhotoRecord>,
    /// Download control shows its confirmation until this instant
    pub download_feedback_until: Option<Instant>,
    /// Outcome of the most recent zoom/torch change
    pub last_constraint: Option<(Constraint, ConstraintStatus)>,
}

/// Messages emitted by the widget's controls
///
/// - **Capture**: take, download and delete the current photo
/// - **Camera**: facing, flash, zoom, filter
/// - **Gallery**: panel visibility and per-item actions
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ===== Capture =====
    TakePhoto,
    Download,
    /// Undo the last capture
    DeleteCurrent,

    // ===== Camera =====
    SwitchCamera,
    ToggleFlash,
    ZoomIn,
    ZoomOut,
    /// Zoom slider moved
    SetZoom(f64),
    SelectFilter(FilterType),

    // ===== Gallery =====
    OpenGallery,
    CloseGallery,
    Gallery(GalleryAction),
}

impl From<GalleryAction> for Message {
    fn from(action: GalleryAction) -> Self {
        Message::Gallery(action)
    }
}
