//! Browser-side behaviour of the birthday page, without the browser.
//!
//! The gallery controller and step navigator only talk to the page through
//! the [`gallery::GalleryView`], [`gallery::Notifier`] and
//! [`navigator::Decor`] traits, so any front end (or a test) can drive them.

pub mod api;
pub mod countdown;
pub mod gallery;
pub mod media_host;
pub mod navigator;

use std::path::PathBuf;

pub use api::MediaApiClient;
pub use gallery::{GalleryController, GalleryView, MediaCard, Notification, Notifier};
pub use media_host::{MediaFile, MediaHost, UnsignedUploadClient};
pub use navigator::{IntervalDecor, StepNavigator};

/// Errors raised by the HTTP clients
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{operation} returned {status}: {body}")]
    Status {
        operation: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{} is {size} bytes, over the {limit} byte limit", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Turn a non-2xx response into [`ClientError::Status`], keeping the body text
async fn check_status(
    response: reqwest::Response,
    operation: &'static str,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        operation,
        status,
        body,
    })
}
