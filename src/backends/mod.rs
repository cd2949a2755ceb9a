// SPDX-License-Identifier: GPL-3.0-only

//! Camera backends
//!
//! - [`camera`]: the media-capture traits every host implements
//! - [`virtual_camera`]: an in-process camera serving still frames

pub mod camera;
pub mod virtual_camera;
