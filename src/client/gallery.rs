//! Gallery controller: load, upload, register and delete memories.
//!
//! Nothing here fails outward. Every problem becomes a transient
//! [`Notification`] and the controller moves on, so the rendered gallery can
//! drift from what the server actually stored.

use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

use super::api::MediaApiClient;
use super::media_host::{delivery_url, MediaFile, MediaHost};
use crate::models::MediaKind;

pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const MAX_VIDEO_BYTES: u64 = 100 * 1024 * 1024;

/// How long a notification stays on screen
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

pub const DELETE_PROMPT: &str = "Delete this memory permanently?";

const CAPTIONS: &[&str] = &[
    "A Cherished Moment",
    "My Favorite Smile",
    "Our Happy Place",
    "Forever in my Heart",
    "So Much Love",
    "Pure Happiness",
    "Unforgettable Times",
    "My World in a Picture",
    "Love this so much!",
    "Best day ever.",
    "Adventures with you.",
    "Just the two of us.",
    "Making memories.",
    "Couldn't be happier.",
    "A day to remember.",
    "My sunshine.",
    "Every moment matters.",
    "The best of times.",
    "My dream come true.",
    "This is everything.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            duration: NOTIFICATION_DURATION,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            duration: NOTIFICATION_DURATION,
        }
    }
}

/// Shows short, non-blocking messages to the visitor
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Notifier that only writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => tracing::info!("{}", notification.message),
            NotificationLevel::Error => tracing::warn!("{}", notification.message),
        }
    }
}

/// One polaroid-style card in a gallery
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCard {
    /// URL as stored, used for deletion
    pub url: String,
    /// Optimized URL the card actually displays
    pub display_url: String,
    pub kind: MediaKind,
    /// Images only
    pub caption: Option<&'static str>,
    /// Tilt in degrees, within [-4, 4)
    pub rotation_deg: f32,
}

impl MediaCard {
    pub fn new<R: Rng>(url: &str, kind: MediaKind, rng: &mut R) -> Self {
        let caption = match kind {
            MediaKind::Image => CAPTIONS.choose(rng).copied(),
            MediaKind::Video => None,
        };
        Self {
            url: url.to_string(),
            display_url: delivery_url(url, kind),
            kind,
            caption,
            rotation_deg: rng.gen_range(-4.0..4.0),
        }
    }
}

/// Where cards are drawn. One gallery per [`MediaKind`].
pub trait GalleryView {
    fn clear(&mut self, kind: MediaKind);
    /// Newest cards go first
    fn prepend(&mut self, card: MediaCard);
    fn remove(&mut self, url: &str, kind: MediaKind);
}

/// Outcome of one [`GalleryController::handle_upload`] call
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    /// Hosted URLs, in upload order
    pub uploaded: Vec<String>,
    /// Files over the size limit
    pub rejected: usize,
    /// Files the host refused or that never arrived
    pub failed: usize,
}

pub struct GalleryController<V, N> {
    api: MediaApiClient,
    host: Box<dyn MediaHost>,
    view: V,
    notifier: N,
}

impl<V: GalleryView, N: Notifier> GalleryController<V, N> {
    pub fn new(api: MediaApiClient, host: Box<dyn MediaHost>, view: V, notifier: N) -> Self {
        Self {
            api,
            host,
            view,
            notifier,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn card(url: &str, kind: MediaKind) -> MediaCard {
        MediaCard::new(url, kind, &mut rand::thread_rng())
    }

    /// Replace both galleries with what the server has stored
    pub async fn load_initial(&mut self) {
        match self.api.list().await {
            Ok(media) => {
                self.view.clear(MediaKind::Image);
                self.view.clear(MediaKind::Video);
                for url in &media.images {
                    self.view.prepend(Self::card(url, MediaKind::Image));
                }
                for url in &media.videos {
                    self.view.prepend(Self::card(url, MediaKind::Video));
                }
                tracing::debug!(
                    "Loaded {} images and {} videos",
                    media.images.len(),
                    media.videos.len()
                );
            }
            Err(e) => {
                tracing::error!("Error loading initial media: {}", e);
                self.notifier
                    .notify(Notification::error("Could not load saved memories"));
            }
        }
    }

    /// Upload `files` one after another, rendering and registering each success
    pub async fn handle_upload(&mut self, files: Vec<MediaFile>, kind: MediaKind) -> UploadSummary {
        let mut summary = UploadSummary::default();
        let (limit, too_big, uploading, uploaded) = match kind {
            MediaKind::Image => (
                MAX_IMAGE_BYTES,
                "Image must be under 5MB",
                "Uploading image...",
                "Image uploaded!",
            ),
            MediaKind::Video => (
                MAX_VIDEO_BYTES,
                "Video must be under 100MB",
                "Uploading video...",
                "Video uploaded!",
            ),
        };

        for file in &files {
            if file.size() > limit {
                self.notifier.notify(Notification::error(too_big));
                summary.rejected += 1;
                continue;
            }

            self.notifier.notify(Notification::success(uploading));
            let url = match self.host.upload(file, kind).await {
                Ok(url) => url,
                Err(e) => {
                    tracing::error!("Upload of {} failed: {}", file.name, e);
                    self.notifier.notify(Notification::error("Upload failed"));
                    summary.failed += 1;
                    continue;
                }
            };
            self.notifier.notify(Notification::success(uploaded));

            // Card goes up before the save; a failed save leaves it on screen
            self.view.prepend(Self::card(&url, kind));
            if let Err(e) = self.api.add(&url, kind).await {
                tracing::error!("Failed to save {} {}: {}", kind, url, e);
                self.notifier.notify(Notification::error("Failed to save memory"));
            }
            summary.uploaded.push(url);
        }

        summary
    }

    /// Delete a card after the visitor confirms. Returns whether it was removed.
    pub async fn delete_media<C>(&mut self, url: &str, kind: MediaKind, confirm: C) -> bool
    where
        C: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_PROMPT) {
            return false;
        }

        if url.is_empty() {
            self.notifier
                .notify(Notification::error("Cannot delete: media info missing."));
            return false;
        }

        match self.api.delete(url, kind).await {
            Ok(()) => {
                self.view.remove(url, kind);
                self.notifier.notify(Notification::success("Memory deleted!"));
                true
            }
            Err(e) => {
                tracing::error!("Failed to delete {} {}: {}", kind, url, e);
                self.notifier
                    .notify(Notification::error("Failed to delete from server."));
                false
            }
        }
    }
}
