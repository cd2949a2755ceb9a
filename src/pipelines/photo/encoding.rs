// SPDX-License-Identifier: GPL-3.0-only

//! Photo encoding
//!
//! Encodes the rendered RGBA frame into a self-contained `data:` URI:
//! - JPEG (default, lossy with quality control)
//! - WebP (lossless)
//! - PNG (lossless)

use crate::backends::camera::types::CameraFrame;
use crate::config::PhotoOutputFormat;
use crate::constants::encoding::DEFAULT_JPEG_QUALITY;
use crate::errors::{CameraError, CameraResult, StorageError, StorageResult};
use base64::Engine;
use image::{ExtendedColorType, ImageFormat, RgbaImage};
use tracing::debug;

const ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Supported encoding formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFormat {
    Webp,
    Jpeg,
    Png,
}

impl EncodingFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingFormat::Webp => "webp",
            EncodingFormat::Jpeg => "jpg",
            EncodingFormat::Png => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            EncodingFormat::Webp => "image/webp",
            EncodingFormat::Jpeg => "image/jpeg",
            EncodingFormat::Png => "image/png",
        }
    }

    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/webp" => Some(EncodingFormat::Webp),
            "image/jpeg" | "image/jpg" => Some(EncodingFormat::Jpeg),
            "image/png" => Some(EncodingFormat::Png),
            _ => None,
        }
    }
}

impl From<PhotoOutputFormat> for EncodingFormat {
    fn from(format: PhotoOutputFormat) -> Self {
        match format {
            PhotoOutputFormat::Webp => EncodingFormat::Webp,
            PhotoOutputFormat::Jpeg => EncodingFormat::Jpeg,
            PhotoOutputFormat::Png => EncodingFormat::Png,
        }
    }
}

/// An encoded still, held as a `data:` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    payload: String,
    pub format: EncodingFormat,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    /// Wrap raw encoded bytes
    pub fn from_bytes(bytes: &[u8], format: EncodingFormat, width: u32, height: u32) -> Self {
        Self {
            payload: to_data_uri(format.mime_type(), bytes),
            format,
            width,
            height,
        }
    }

    /// Wrap an already encoded `data:` URI
    pub fn from_payload(payload: String, format: EncodingFormat, width: u32, height: u32) -> Self {
        Self {
            payload,
            format,
            width,
            height,
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn into_payload(self) -> String {
        self.payload
    }
}

/// Build a base64 `data:` URI
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, ENGINE.encode(bytes))
}

/// Split a base64 `data:` URI into its MIME type and decoded bytes
pub fn parse_data_uri(uri: &str) -> StorageResult<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| StorageError::InvalidPayload("missing data: prefix".to_string()))?;
    let (header, body) = rest
        .split_once(',')
        .ok_or_else(|| StorageError::InvalidPayload("missing ',' separator".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| StorageError::InvalidPayload("payload is not base64".to_string()))?;
    let bytes = ENGINE
        .decode(body)
        .map_err(|e| StorageError::InvalidPayload(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}

/// Encodes whatever frame is currently rendered
pub trait FrameEncoder {
    fn encode(&self, frame: &CameraFrame) -> CameraResult<EncodedImage>;
}

/// [`FrameEncoder`] backed by the `image` crate
#[derive(Debug, Clone, Copy)]
pub struct ImageEncoder {
    format: EncodingFormat,
    jpeg_quality: u8,
}

impl ImageEncoder {
    pub fn new(format: EncodingFormat) -> Self {
        Self {
            format,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Set JPEG quality (0-100, only affects JPEG)
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.min(100);
        self
    }

    pub fn format(&self) -> EncodingFormat {
        self.format
    }

    fn encode_webp(image: &RgbaImage) -> Result<Vec<u8>, String> {
        let mut buffer = Vec::new();
        image::codecs::webp::WebPEncoder::new_lossless(&mut buffer)
            .encode(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| format!("WebP encoding failed: {}", e))?;
        Ok(buffer)
    }

    fn encode_jpeg(image: RgbaImage, quality: u8) -> Result<Vec<u8>, String> {
        // JPEG has no alpha channel
        let rgb = image::DynamicImage::ImageRgba8(image).to_rgb8();
        let mut buffer = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality)
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
            .map_err(|e| format!("JPEG encoding failed: {}", e))?;
        Ok(buffer)
    }

    fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, String> {
        let mut buffer = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| format!("PNG encoding failed: {}", e))?;
        Ok(buffer)
    }
}

impl Default for ImageEncoder {
    fn default() -> Self {
        Self::new(EncodingFormat::Jpeg)
    }
}

impl FrameEncoder for ImageEncoder {
    fn encode(&self, frame: &CameraFrame) -> CameraResult<EncodedImage> {
        if frame.width == 0 || frame.height == 0 {
            return Err(CameraError::EncodingFailed(
                "Frame has no pixels yet".to_string(),
            ));
        }

        let image = RgbaImage::from_raw(frame.width, frame.height, frame.data.to_vec())
            .ok_or_else(|| {
                CameraError::EncodingFailed(format!(
                    "Buffer of {} bytes does not hold a {}x{} RGBA frame",
                    frame.data.len(),
                    frame.width,
                    frame.height
                ))
            })?;

        let bytes = match self.format {
            EncodingFormat::Webp => Self::encode_webp(&image),
            EncodingFormat::Jpeg => Self::encode_jpeg(image, self.jpeg_quality),
            EncodingFormat::Png => Self::encode_png(&image),
        }
        .map_err(CameraError::EncodingFailed)?;

        debug!(
            width = frame.width,
            height = frame.height,
            format = ?self.format,
            size = bytes.len(),
            "Frame encoded"
        );

        Ok(EncodedImage::from_bytes(
            &bytes,
            self.format,
            frame.width,
            frame.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn frame(width: u32, height: u32) -> CameraFrame {
        CameraFrame {
            width,
            height,
            data: Arc::from(vec![128u8; (width * height * 4) as usize]),
        }
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(EncodingFormat::Webp.extension(), "webp");
        assert_eq!(EncodingFormat::Jpeg.extension(), "jpg");
        assert_eq!(EncodingFormat::Png.extension(), "png");
    }

    #[test]
    fn test_mime_types_roundtrip() {
        for format in [EncodingFormat::Webp, EncodingFormat::Jpeg, EncodingFormat::Png] {
            assert_eq!(EncodingFormat::from_mime_type(format.mime_type()), Some(format));
        }
        assert_eq!(EncodingFormat::from_mime_type("image/gif"), None);
    }

    #[test]
    fn test_parse_data_uri() {
        let uri = to_data_uri("image/png", &[1, 2, 3]);
        let (mime, bytes) = parse_data_uri(&uri).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, vec![1, 2, 3]);

        assert!(parse_data_uri("image/png;base64,AAAA").is_err());
        assert!(parse_data_uri("data:image/png,plain").is_err());
    }

    #[test]
    fn test_encode_each_format() {
        for format in [EncodingFormat::Webp, EncodingFormat::Jpeg, EncodingFormat::Png] {
            let encoded = ImageEncoder::new(format).encode(&frame(4, 3)).unwrap();
            assert_eq!((encoded.width, encoded.height), (4, 3));
            let prefix = format!("data:{};base64,", format.mime_type());
            assert!(encoded.payload().starts_with(&prefix));

            let (_, bytes) = parse_data_uri(encoded.payload()).unwrap();
            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (4, 3));
        }
    }

    #[test]
    fn test_default_encoding_is_lossy() {
        // Sensor-like noise, which lossless formats cannot shrink
        let data: Vec<u8> = (0..64u32 * 64)
            .flat_map(|i| {
                let n = i.wrapping_mul(2_654_435_761);
                [(n >> 8) as u8, (n >> 16) as u8, (n >> 24) as u8, 255]
            })
            .collect();
        let noisy = CameraFrame {
            width: 64,
            height: 64,
            data: Arc::from(data),
        };

        let jpeg = ImageEncoder::default().with_jpeg_quality(50).encode(&noisy).unwrap();
        assert_eq!(jpeg.format, EncodingFormat::Jpeg);
        let png = ImageEncoder::new(EncodingFormat::Png).encode(&noisy).unwrap();
        assert!(jpeg.payload().len() < png.payload().len());
    }

    #[test]
    fn test_empty_or_short_frame_fails() {
        let encoder = ImageEncoder::default();
        assert!(matches!(
            encoder.encode(&frame(0, 0)),
            Err(CameraError::EncodingFailed(_))
        ));

        let short = CameraFrame {
            width: 4,
            height: 4,
            data: Arc::from(vec![0u8; 8]),
        };
        assert!(matches!(
            encoder.encode(&short),
            Err(CameraError::EncodingFailed(_))
        ));
    }
}
