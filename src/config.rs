// SPDX-License-Identifier: GPL-3.0-only

use crate::constants::{GALLERY_STORAGE_KEY, encoding, zoom};
use crate::errors::StorageResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Directory name used under the platform config/data/pictures dirs
pub const APP_DIR_NAME: &str = "camera-widget";

const CONFIG_FILE_NAME: &str = "config.json";

/// Output format of captured photos
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum PhotoOutputFormat {
    /// WebP (lossless)
    Webp,
    /// JPEG (lossy, quality from `jpeg_quality`)
    #[default]
    Jpeg,
    /// PNG (lossless)
    Png,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key-value slot the gallery is persisted under
    pub storage_key: String,
    /// Zoom in/out button increment
    pub zoom_step: f64,
    /// Photo encoding format
    pub photo_format: PhotoOutputFormat,
    /// JPEG quality (0-100)
    pub jpeg_quality: u8,
    /// Where downloads are written; `None` uses `<pictures>/camera-widget`
    pub download_dir: Option<PathBuf>,
    /// Open the front camera at startup
    pub start_facing_front: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: GALLERY_STORAGE_KEY.to_string(),
            zoom_step: zoom::STEP,
            photo_format: PhotoOutputFormat::default(),
            jpeg_quality: encoding::DEFAULT_JPEG_QUALITY,
            download_dir: None,
            start_facing_front: false, // Back camera first
        }
    }
}

impl Config {
    /// Path of the config file (`<config dir>/camera-widget/config.json`)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the config, falling back to defaults if it is missing or invalid
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Self::default();
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to read config, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Write the config back to its default location
    pub fn save(&self) -> StorageResult<()> {
        let Some(path) = Self::path() else {
            warn!("No config directory available, config not saved");
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Resolved download directory
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir.clone().unwrap_or_else(|| {
            dirs::picture_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME)
        })
    }
}
