//! Maintenance tasks behind the `keepsake-admin` binary.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::MediaApiClient;
use crate::models::{MediaKind, MediaRequest, MediaStore};

/// Pause between POSTs when replaying a database
pub const PUSH_DELAY: Duration = Duration::from_millis(200);

/// Database left behind by a local checkout of the API, relative to the
/// working directory
pub const LOCAL_API_DB: &str = "api/media/db.json";

/// The local API database when it exists, otherwise the configured one
pub fn resolve_db_path(configured: PathBuf, local_api_db: &Path) -> PathBuf {
    if local_api_db.is_file() {
        local_api_db.to_path_buf()
    } else {
        configured
    }
}

/// One item as a `- {"url":...,"type":...}` line
pub fn item_line(url: &str, kind: MediaKind) -> serde_json::Result<String> {
    Ok(format!("- {}", serde_json::to_string(&MediaRequest::new(url, kind))?))
}

/// Strict read of a database file. Unlike the server, a missing or broken
/// file is an error here.
pub async fn read_database(path: &Path) -> Result<MediaStore> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("DB file not found: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Every stored URL as a `(url, kind)` pair, images first
pub fn push_items(media: &MediaStore) -> Vec<(String, MediaKind)> {
    media
        .images
        .iter()
        .map(|url| (url.clone(), MediaKind::Image))
        .chain(media.videos.iter().map(|url| (url.clone(), MediaKind::Video)))
        .collect()
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PushReport {
    pub sent: usize,
    pub failed: usize,
}

/// POST every item to the remote API, one at a time. Failures are reported
/// and skipped.
pub async fn push(
    client: &MediaApiClient,
    items: &[(String, MediaKind)],
    delay: Duration,
) -> PushReport {
    let mut report = PushReport::default();

    for (url, kind) in items {
        if let Ok(line) = item_line(url, *kind) {
            println!("{}", line);
        }
        match client.add(url, *kind).await {
            Ok(response) => {
                println!("  => {} {}", response.message, response.url);
                report.sent += 1;
            }
            Err(e) => {
                eprintln!("  ERROR: {}", e);
                tracing::warn!("Push of {} {} failed: {}", kind, url, e);
                report.failed += 1;
            }
        }
        tokio::time::sleep(delay).await;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_push_items_images_first() {
        let media = MediaStore {
            images: vec!["a.jpg".into(), "b.jpg".into()],
            videos: vec!["c.mp4".into()],
        };

        assert_eq!(
            push_items(&media),
            vec![
                ("a.jpg".to_string(), MediaKind::Image),
                ("b.jpg".to_string(), MediaKind::Image),
                ("c.mp4".to_string(), MediaKind::Video),
            ]
        );
        assert!(push_items(&MediaStore::default()).is_empty());
    }

    #[test]
    fn test_item_line_escapes_url() {
        assert_eq!(
            item_line("http://x/a.jpg", MediaKind::Image).unwrap(),
            r#"- {"url":"http://x/a.jpg","type":"image"}"#
        );

        let line = item_line(r#"http://x/"q"\b.mp4"#, MediaKind::Video).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&line[2..]).unwrap();
        assert_eq!(parsed["url"], r#"http://x/"q"\b.mp4"#);
        assert_eq!(parsed["type"], "video");
    }

    #[test]
    fn test_resolve_db_path_prefers_local_api_db() {
        let dir = TempDir::new().unwrap();
        let configured = dir.path().join("db.json");
        let local = dir.path().join(LOCAL_API_DB);

        assert_eq!(resolve_db_path(configured.clone(), &local), configured);

        std::fs::create_dir_all(local.parent().unwrap()).unwrap();
        std::fs::write(&local, "{}").unwrap();
        assert_eq!(resolve_db_path(configured, &local), local);
    }

    #[tokio::test]
    async fn test_read_database_is_strict() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("db.json");

        let err = read_database(&db).await.unwrap_err();
        assert!(err.to_string().contains("DB file not found"));

        tokio::fs::write(&db, "nope").await.unwrap();
        assert!(read_database(&db).await.is_err());

        tokio::fs::write(&db, r#"{"images":["a.jpg"],"videos":[]}"#)
            .await
            .unwrap();
        assert_eq!(read_database(&db).await.unwrap().images, vec!["a.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_push_continues_after_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/media"))
            .and(body_json(serde_json::json!({ "url": "bad.jpg", "type": "image" })))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/media"))
            .and(body_json(serde_json::json!({ "url": "c.mp4", "type": "video" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "message": "Media added",
                "url": "c.mp4"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = MediaApiClient::new(&server.uri()).unwrap();
        let items = vec![
            ("bad.jpg".to_string(), MediaKind::Image),
            ("c.mp4".to_string(), MediaKind::Video),
        ];
        let report = push(&client, &items, Duration::ZERO).await;

        assert_eq!(report, PushReport { sent: 1, failed: 1 });
    }
}
