use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which collection of the media store a URL belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(format!("type must be one of: image, video, got '{}'", other)),
        }
    }
}

/// The persisted document: every known image and video URL, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MediaStore {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
}

impl MediaStore {
    pub fn collection(&self, kind: MediaKind) -> &[String] {
        match kind {
            MediaKind::Image => &self.images,
            MediaKind::Video => &self.videos,
        }
    }

    fn collection_mut(&mut self, kind: MediaKind) -> &mut Vec<String> {
        match kind {
            MediaKind::Image => &mut self.images,
            MediaKind::Video => &mut self.videos,
        }
    }

    /// Append `url` unless it is already present. Returns whether the store grew.
    pub fn add(&mut self, kind: MediaKind, url: &str) -> bool {
        let items = self.collection_mut(kind);
        if items.iter().any(|existing| existing == url) {
            return false;
        }
        items.push(url.to_string());
        true
    }

    /// Remove every occurrence of `url`, returning how many entries were dropped.
    pub fn remove(&mut self, kind: MediaKind, url: &str) -> usize {
        let items = self.collection_mut(kind);
        let before = items.len();
        items.retain(|existing| existing != url);
        before - items.len()
    }
}

/// Request body for POST and DELETE on the media collection.
///
/// Both fields are optional at the serde level so that missing or malformed
/// values are reported as a 400 by [`MediaRequest::validate`] rather than
/// rejected by the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MediaRequest {
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl MediaRequest {
    pub fn new(url: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            url: Some(url.into()),
            kind: Some(kind.as_str().to_string()),
        }
    }

    /// Check the payload, returning the URL and its collection
    pub fn validate(self) -> Result<(String, MediaKind), String> {
        let url = match self.url {
            Some(url) if !url.is_empty() => url,
            _ => return Err("url must be a non-empty string".to_string()),
        };
        let kind = self
            .kind
            .as_deref()
            .ok_or_else(|| "type is required".to_string())?
            .parse::<MediaKind>()?;
        Ok((url, kind))
    }

    /// Looser check for deletes: `url` and `type` must be present, but an
    /// unknown type is not an error. It names no collection, so nothing can
    /// match and the caller reports it as not found.
    pub fn validate_delete(self) -> Result<(String, String), String> {
        let url = match self.url {
            Some(url) if !url.is_empty() => url,
            _ => return Err("url must be a non-empty string".to_string()),
        };
        match self.kind {
            Some(kind) if !kind.is_empty() => Ok((url, kind)),
            _ => Err("type is required".to_string()),
        }
    }
}

/// Response type for successful POST and DELETE operations
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MediaResponse {
    pub message: String,
    pub url: String,
}
