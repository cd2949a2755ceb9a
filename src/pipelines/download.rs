// SPDX-License-Identifier: GPL-3.0-only

//! Client-side photo downloads

use crate::constants::DOWNLOAD_FILENAME_PREFIX;
use crate::errors::StorageResult;
use crate::gallery::PhotoRecord;
use crate::pipelines::photo::{EncodingFormat, parse_data_uri};
use futures::future::LocalBoxFuture;
use std::path::PathBuf;
use tracing::info;

/// Starts a download of an encoded payload under a suggested filename
pub trait FileSaver {
    fn save<'a>(&'a self, payload: &'a str, filename: &'a str)
    -> LocalBoxFuture<'a, StorageResult<()>>;
}

/// Suggested filename for a photo: `camera-photo-<id>.<ext>`
///
/// The extension follows the payload's MIME type, `webp` if it is unknown.
pub fn download_filename(record: &PhotoRecord) -> String {
    let extension = record
        .data
        .strip_prefix("data:")
        .and_then(|rest| rest.split([';', ',']).next())
        .and_then(EncodingFormat::from_mime_type)
        .unwrap_or(EncodingFormat::Webp)
        .extension();
    format!("{}-{}.{}", DOWNLOAD_FILENAME_PREFIX, record.id, extension)
}

/// Writes downloads into a directory
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

impl FileSaver for DirectorySaver {
    fn save<'a>(
        &'a self,
        payload: &'a str,
        filename: &'a str,
    ) -> LocalBoxFuture<'a, StorageResult<()>> {
        Box::pin(async move {
            let (_, bytes) = parse_data_uri(payload)?;
            tokio::fs::create_dir_all(&self.dir).await?;
            let path = self.dir.join(filename);
            tokio::fs::write(&path, &bytes).await?;
            info!(path = %path.display(), size = bytes.len(), "Photo downloaded");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StorageError;
    use crate::pipelines::photo::to_data_uri;

    fn record(id: u64, data: &str) -> PhotoRecord {
        PhotoRecord {
            id,
            data: data.to_string(),
            timestamp: "2026-10-16T09:30:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_filename_follows_payload_type() {
        let webp = record(1_760_000_000_000, "data:image/webp;base64,AAAA");
        assert_eq!(download_filename(&webp), "camera-photo-1760000000000.webp");

        let jpeg = record(5, "data:image/jpeg;base64,AAAA");
        assert_eq!(download_filename(&jpeg), "camera-photo-5.jpg");

        let unknown = record(6, "not a data uri");
        assert_eq!(download_filename(&unknown), "camera-photo-6.webp");
    }

    #[tokio::test]
    async fn test_directory_saver_writes_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path().join("photos"));
        let payload = to_data_uri("image/webp", b"RIFF1234");

        saver.save(&payload, "camera-photo-1.webp").await.unwrap();
        let written = std::fs::read(dir.path().join("photos/camera-photo-1.webp")).unwrap();
        assert_eq!(written, b"RIFF1234");
    }

    #[tokio::test]
    async fn test_directory_saver_rejects_bad_payload() {
        let dir = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(dir.path());
        let result = saver.save("garbage", "x.webp").await;
        assert!(matches!(result, Err(StorageError::InvalidPayload(_))));
    }
}
