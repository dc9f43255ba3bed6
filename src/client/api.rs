use reqwest::Client;
use std::time::Duration;

use super::{check_status, ClientError, Result};
use crate::models::{MediaKind, MediaRequest, MediaResponse, MediaStore};
use crate::routes;

/// Request timeout for calls to the media API
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the `/api/media` endpoints
#[derive(Clone, Debug)]
pub struct MediaApiClient {
    client: Client,
    base_url: String,
    secret_key: Option<String>,
}

impl MediaApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key: None,
        })
    }

    /// Send `x-secret-key` on every write
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    fn media_url(&self) -> String {
        format!("{}{}", self.base_url, routes::API_MEDIA)
    }

    fn write(&self, method: reqwest::Method, url: &str, kind: MediaKind) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(method, self.media_url())
            .json(&MediaRequest::new(url, kind));
        if let Some(secret) = &self.secret_key {
            request = request.header(routes::SECRET_HEADER, secret);
        }
        request
    }

    pub async fn list(&self) -> Result<MediaStore> {
        let response = self.client.get(self.media_url()).send().await?;
        let media = check_status(response, "list media").await?.json().await?;
        Ok(media)
    }

    pub async fn add(&self, url: &str, kind: MediaKind) -> Result<MediaResponse> {
        let response = self.write(reqwest::Method::POST, url, kind).send().await?;
        let added = check_status(response, "add media").await?.json().await?;
        tracing::debug!("Registered {} {}", kind, url);
        Ok(added)
    }

    /// Delete every stored copy of `url`. A 404 surfaces as [`ClientError::Status`].
    pub async fn delete(&self, url: &str, kind: MediaKind) -> Result<()> {
        let response = self.write(reqwest::Method::DELETE, url, kind).send().await?;
        check_status(response, "delete media").await?;
        tracing::debug!("Deleted {} {}", kind, url);
        Ok(())
    }
}

impl ClientError {
    /// True when the server answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_parses_store() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/media"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "images": ["http://x/a.jpg"],
                "videos": ["http://x/b.mp4"]
            })))
            .mount(&server)
            .await;

        let client = MediaApiClient::new(&format!("{}/", server.uri())).unwrap();
        let media = client.list().await.unwrap();

        assert_eq!(media.images, vec!["http://x/a.jpg".to_string()]);
        assert_eq!(media.videos, vec!["http://x/b.mp4".to_string()]);
    }

    #[tokio::test]
    async fn test_add_sends_payload_and_secret() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/media"))
            .and(header("x-secret-key", "s3cret"))
            .and(body_json(serde_json::json!({ "url": "http://x/a.jpg", "type": "image" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "message": "Media added",
                "url": "http://x/a.jpg"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = MediaApiClient::new(&server.uri())
            .unwrap()
            .with_secret_key("s3cret");
        let added = client.add("http://x/a.jpg", MediaKind::Image).await.unwrap();

        assert_eq!(added.url, "http://x/a.jpg");
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/media"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "error": "Media not found" })),
            )
            .mount(&server)
            .await;

        let client = MediaApiClient::new(&server.uri()).unwrap();
        let err = client
            .delete("http://x/missing.mp4", MediaKind::Video)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("Media not found"));
    }

    #[tokio::test]
    async fn test_server_error_is_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = MediaApiClient::new(&server.uri()).unwrap();
        let err = client.list().await.unwrap_err();

        assert!(matches!(err, ClientError::Status { .. }));
        assert!(!err.is_not_found());
    }
}
