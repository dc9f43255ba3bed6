//! Uploads to the external media host and its delivery URL conventions.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::{check_status, ClientError, Result};
use crate::config::MediaHostConfig;
use crate::models::MediaKind;

/// Videos can take a while to upload
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

const UPLOAD_SEGMENT: &str = "/upload/";
const IMAGE_TRANSFORM: &str = "/upload/f_auto,q_auto,w_auto,c_limit/";
const VIDEO_TRANSFORM: &str = "/upload/f_auto,q_auto/";

/// A file picked by the visitor, held in memory until uploaded
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub name: String,
    pub data: Bytes,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, refusing anything over `max_bytes` before its
    /// contents are loaded
    pub async fn from_path(path: &Path, max_bytes: u64) -> Result<Self> {
        let io_error = |source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        };
        let size = tokio::fs::metadata(path).await.map_err(io_error)?.len();
        if size > max_bytes {
            return Err(ClientError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: max_bytes,
            });
        }

        let data = tokio::fs::read(path).await.map_err(io_error)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self {
            name,
            data: Bytes::from(data),
        })
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Somewhere uploaded files end up, returning a public URL
#[async_trait::async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, file: &MediaFile, kind: MediaKind) -> Result<String>;
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Client-side uploads through an unsigned upload preset
pub struct UnsignedUploadClient {
    client: Client,
    config: MediaHostConfig,
}

impl UnsignedUploadClient {
    pub fn new(config: MediaHostConfig) -> Result<Self> {
        let client = Client::builder().timeout(UPLOAD_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn upload_url(&self, kind: MediaKind) -> String {
        format!(
            "{}/v1_1/{}/{}/upload",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name,
            kind
        )
    }

    fn preset_and_folder(&self, kind: MediaKind) -> (&str, &str) {
        match kind {
            MediaKind::Image => (self.config.image_preset.as_str(), self.config.image_folder.as_str()),
            MediaKind::Video => (self.config.video_preset.as_str(), self.config.video_folder.as_str()),
        }
    }
}

#[async_trait::async_trait]
impl MediaHost for UnsignedUploadClient {
    async fn upload(&self, file: &MediaFile, kind: MediaKind) -> Result<String> {
        let (preset, folder) = self.preset_and_folder(kind);
        let form = Form::new()
            .part(
                "file",
                Part::stream_with_length(file.data.clone(), file.size()).file_name(file.name.clone()),
            )
            .text("upload_preset", preset.to_string())
            .text("folder", folder.to_string());

        let response = self
            .client
            .post(self.upload_url(kind))
            .multipart(form)
            .send()
            .await?;
        let operation = match kind {
            MediaKind::Image => "image upload",
            MediaKind::Video => "video upload",
        };
        let uploaded: UploadResponse = check_status(response, operation).await?.json().await?;

        tracing::info!("Uploaded {} ({} bytes) to {}", file.name, file.size(), uploaded.secure_url);
        Ok(uploaded.secure_url)
    }
}

/// Rewrite a stored URL into the optimized delivery URL for display.
///
/// Only the first `/upload/` segment is rewritten; URLs without one are
/// returned unchanged.
pub fn delivery_url(url: &str, kind: MediaKind) -> String {
    let transform = match kind {
        MediaKind::Image => IMAGE_TRANSFORM,
        MediaKind::Video => VIDEO_TRANSFORM,
    };
    url.replacen(UPLOAD_SEGMENT, transform, 1)
}
