// SPDX-License-Identifier: GPL-3.0-only

//! Control visuals
//!
//! A flat description of what every control should show. A presentation
//! layer (DOM, native toolkit, terminal) renders it and sends back
//! [`crate::app::Message`]s.

use crate::app::AppModel;
use crate::app::state::FilterType;
use crate::backends::camera::MediaCapture;
use crate::constants::labels;
use crate::gallery::view::{self, GalleryItem};
use crate::storage::KeyValueStore;
use std::time::Instant;

/// Zoom buttons and slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomControl {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    /// Slider granularity reported by the device (0.0 if unknown)
    pub step: f64,
    /// Whether the device supports zoom at all
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterButton {
    pub filter: FilterType,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlsView<'a> {
    /// Preview is bound and rendering
    pub preview_visible: bool,
    /// Filter expression for the preview element
    pub preview_filter: &'static str,
    pub capture_enabled: bool,
    pub facing_label: &'static str,
    pub flash_active: bool,
    pub torch_available: bool,
    pub zoom: ZoomControl,
    pub filters: [FilterButton; 5],
    /// Source of the photo display (the photo taken this session)
    pub photo: Option<&'a str>,
    pub download_visible: bool,
    pub delete_visible: bool,
    pub download_label: &'static str,
    /// Gallery count badge; hidden when the gallery is empty
    pub badge: Option<String>,
    pub gallery_open: bool,
}

impl<C: MediaCapture, S: KeyValueStore> AppModel<C, S> {
    /// Control visuals as of now
    pub fn controls(&self) -> ControlsView<'_> {
        self.controls_at(Instant::now())
    }

    /// Control visuals at `now` (decides whether download feedback has expired)
    pub fn controls_at(&self, now: Instant) -> ControlsView<'_> {
        let (min, max) = self.preview.zoom_bounds();
        let zoom_range = self.preview.capabilities.zoom;

        let filters = FilterType::ALL.map(|filter| FilterButton {
            filter,
            label: filter.name(),
            active: filter == self.state.filter,
        });

        let photo = self.ui.current_photo.as_ref().map(|p| p.data.as_str());
        let download_label = match self.ui.download_feedback_until {
            Some(until) if now < until => labels::DOWNLOAD_SAVED,
            _ => labels::DOWNLOAD,
        };
        let count = self.gallery.count();

        ControlsView {
            preview_visible: self.preview.bound,
            preview_filter: self.state.filter.css_filter(),
            capture_enabled: self.preview.bound,
            facing_label: self.state.facing_label(),
            flash_active: self.state.flash_on,
            torch_available: self.preview.capabilities.torch,
            zoom: ZoomControl {
                value: self.state.zoom,
                min,
                max,
                step: zoom_range.map(|r| r.step()).unwrap_or(0.0),
                enabled: zoom_range.is_some_and(|r| r.is_adjustable()),
            },
            filters,
            photo,
            download_visible: photo.is_some(),
            delete_visible: photo.is_some(),
            download_label,
            badge: (count > 0).then(|| count.to_string()),
            gallery_open: self.ui.gallery_open,
        }
    }

    /// Gallery items, recomputed from the current records
    pub fn gallery_items(&self) -> Vec<GalleryItem<'_>> {
        view::render(self.gallery.records())
    }
}
