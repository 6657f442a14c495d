// DocumentSource backed by reqwest for remote endpoints and tokio::fs for local files
use crate::application::document_source::{DocumentSource, FetchError, SourceLocation};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct HttpDocumentSource {
    client: reqwest::Client,
}

impl HttpDocumentSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_remote(&self, url: &str) -> Result<Value, FetchError> {
        tracing::debug!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
            location: url.to_string(),
            source,
        })
    }

    async fn read_file(&self, path: &Path) -> Result<Value, FetchError> {
        tracing::debug!("Reading {}", path.display());
        let body = tokio::fs::read(path).await.map_err(|source| FetchError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
            location: path.display().to_string(),
            source,
        })
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch_json(&self, location: &SourceLocation) -> Result<Value, FetchError> {
        match location {
            SourceLocation::Remote(url) => self.fetch_remote(url).await,
            SourceLocation::File(path) => self.read_file(path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::io::Write;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_remote_json() {
        let base = serve(Router::new().route(
            "/speed.json",
            get(|| async { Json(json!({"id": "HOE", "current": {"value": 12}})) }),
        ))
        .await;

        let document = HttpDocumentSource::default()
            .fetch_json(&SourceLocation::Remote(format!("{}/speed.json", base)))
            .await
            .unwrap();

        assert_eq!(document["current"]["value"], json!(12));
    }

    #[tokio::test]
    async fn test_remote_failures() {
        let base = serve(
            Router::new()
                .route("/down", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
                .route("/html", get(|| async { "<html>not json</html>" })),
        )
        .await;
        let source = HttpDocumentSource::default();

        let err = source
            .fetch_json(&SourceLocation::Remote(format!("{}/down", base)))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status, .. } if status == StatusCode::SERVICE_UNAVAILABLE));

        let err = source
            .fetch_json(&SourceLocation::Remote(format!("{}/html", base)))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"series": [[1700000000, 31]]}"#).unwrap();
        let source = HttpDocumentSource::default();

        let document = source
            .fetch_json(&SourceLocation::File(file.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(document, json!({"series": [[1700000000, 31]]}));

        let err = source
            .fetch_json(&SourceLocation::File("does/not/exist.json".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Read { .. }));
    }
}
