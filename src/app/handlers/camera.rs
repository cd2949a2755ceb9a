// SPDX-License-Identifier: GPL-3.0-only

//! Camera control handlers
//!
//! Facing switch, torch, zoom and preview filter.

use crate::app::AppModel;
use crate::app::state::{FilterType, PreviewState};
use crate::backends::camera::MediaCapture;
use crate::constants::zoom;
use crate::errors::{Constraint, ConstraintStatus};
use crate::storage::KeyValueStore;
use tracing::{debug, info, warn};

impl<C: MediaCapture, S: KeyValueStore> AppModel<C, S> {
    /// (Re)acquire the stream for the current facing mode
    pub(crate) async fn restart_camera(&mut self) {
        match self.session.start(self.state.facing_front).await {
            Ok(capabilities) => {
                self.preview = PreviewState {
                    bound: true,
                    capabilities,
                };
                // Zoom starts over with every stream
                self.state.zoom = self.preview.clamp_zoom(zoom::DEFAULT);

                if self.state.flash_on {
                    let status = self.session.set_torch(true).await;
                    self.record_constraint(Constraint::Torch, status);
                }
            }
            Err(_) => {
                // Already logged by the session; stay in the no-preview state
                self.preview = PreviewState::default();
                self.state.zoom = zoom::DEFAULT;
            }
        }
    }

    pub(crate) async fn handle_switch_camera(&mut self) {
        self.state.facing_front = !self.state.facing_front;
        info!(
            facing_front = self.state.facing_front,
            label = self.state.facing_label(),
            "Switching camera"
        );
        self.restart_camera().await;
    }

    /// Flip the flash flag and try to apply it
    ///
    /// The flag is kept even if the device refuses; the control shows
    /// what the user asked for.
    pub(crate) async fn handle_toggle_flash(&mut self) {
        self.state.flash_on = !self.state.flash_on;
        info!(flash_on = self.state.flash_on, "Flash toggled");
        let status = self.session.set_torch(self.state.flash_on).await;
        self.record_constraint(Constraint::Torch, status);
    }

    pub(crate) async fn handle_zoom_step(&mut self, delta: f64) {
        let target = self.preview.clamp_zoom(self.state.zoom + delta);
        if (target - self.state.zoom).abs() < f64::EPSILON {
            debug!(zoom = self.state.zoom, "Zoom already at limit");
            return;
        }
        self.apply_zoom(target).await;
    }

    pub(crate) async fn handle_set_zoom(&mut self, value: f64) {
        if value.is_nan() {
            warn!("Ignoring NaN zoom slider value");
            return;
        }
        let target = self.preview.clamp_zoom(value);
        self.apply_zoom(target).await;
    }

    async fn apply_zoom(&mut self, target: f64) {
        self.state.zoom = target;
        debug!(zoom = target, "Zoom changed");
        let status = self.session.set_zoom(target).await;
        self.record_constraint(Constraint::Zoom, status);
    }

    pub(crate) fn handle_select_filter(&mut self, filter: FilterType) {
        if self.state.filter != filter {
            info!(filter = filter.name(), "Filter selected");
            self.state.filter = filter;
        }
    }

    fn record_constraint(&mut self, constraint: Constraint, status: ConstraintStatus) {
        if let ConstraintStatus::Failed(reason) = &status {
            debug!(%constraint, reason = %reason, "Constraint change did not take effect");
        }
        self.ui.last_constraint = Some((constraint, status));
    }
}
