// SPDX-License-Identifier: GPL-3.0-only

//! Widget-wide constants

use std::time::Duration;

/// Key-value slot holding the serialized gallery
pub const GALLERY_STORAGE_KEY: &str = "camera-gallery";

/// Prefix of suggested download filenames (`camera-photo-<id>.<ext>`)
pub const DOWNLOAD_FILENAME_PREFIX: &str = "camera-photo";

/// Zoom constants
pub mod zoom {
    /// Amount added or removed by the zoom in/out buttons
    pub const STEP: f64 = 0.5;

    /// Zoom value before any capability is known
    pub const DEFAULT: f64 = 1.0;

    /// Bounds used when the track reports no zoom capability.
    /// min == max, so stepping is inert.
    pub const FALLBACK_MIN: f64 = 1.0;
    pub const FALLBACK_MAX: f64 = 1.0;
}

/// Display-layer filter expressions
pub mod filters {
    pub const NONE: &str = "none";
    pub const GRAYSCALE: &str = "grayscale(100%)";
    pub const SEPIA: &str = "sepia(100%)";
    pub const INVERT: &str = "invert(100%)";
    pub const BLUR: &str = "blur(2px)";
}

/// User-visible labels
pub mod labels {
    /// Facing-toggle label while the back camera is active
    pub const SWITCH_TO_FRONT: &str = "Front Camera!";
    /// Facing-toggle label while the front camera is active
    pub const SWITCH_TO_BACK: &str = "Back Camera!";

    pub const DOWNLOAD: &str = "Download";
    pub const DOWNLOAD_SAVED: &str = "Saved!";

    /// Shown by the gallery when it holds no photos
    pub const EMPTY_GALLERY: &str = "No photos yet";
}

/// Timing constants
pub mod timing {
    use super::Duration;

    /// How long the download control shows its confirmation label
    pub const DOWNLOAD_FEEDBACK: Duration = Duration::from_secs(2);
}

/// Photo encoding constants
pub mod encoding {
    /// Default JPEG quality (0-100)
    pub const DEFAULT_JPEG_QUALITY: u8 = 92;
}
