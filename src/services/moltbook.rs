//! Moltbook REST client
//!
//! Read-only GETs against the Moltbook API with a bearer token and a fixed
//! request timeout. Responses are returned as raw JSON so the proxy can pass
//! them through untouched.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::config::MoltbookSettings;
use crate::services::credentials::Credential;

/// Errors that can occur when calling the Moltbook API
#[derive(Error, Debug)]
pub enum MoltbookServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

#[derive(Clone)]
pub struct MoltbookService {
    client: Client,
    base_url: String,
    credential: Credential,
}

impl MoltbookService {
    pub fn new(settings: &MoltbookSettings, credential: Credential) -> Result<Self, MoltbookServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        tracing::info!(
            base_url = %settings.base_url,
            timeout_seconds = settings.timeout_seconds,
            "Initialized Moltbook service"
        );

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            credential,
        })
    }

    /// GET `{base_url}{path}` with the given query pairs and decode the body as JSON
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, MoltbookServiceError> {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(url = %url, query = ?query, "Calling Moltbook API");

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.credential.expose())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(MoltbookServiceError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|e| MoltbookServiceError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn service_for(server: &MockServer) -> MoltbookService {
        let settings = MoltbookSettings {
            api_key: None,
            base_url: format!("{}/api/v1/", server.base_url()),
            timeout_seconds: 1,
        };
        MoltbookService::new(&settings, Credential::new("moltbook_sk_test").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_get_json_sends_bearer_and_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/posts")
                    .header("authorization", "Bearer moltbook_sk_test")
                    .query_param("sort", "new")
                    .query_param("limit", "3");
                then.status(200).json_body(json!({"success": true, "posts": [{"id": "p1"}]}));
            })
            .await;

        let body = service_for(&server)
            .get_json("/posts", &[("sort", "new".to_string()), ("limit", "3".to_string())])
            .await
            .unwrap();

        assert_eq!(body, json!({"success": true, "posts": [{"id": "p1"}]}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_json_non_success_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/submolts");
                then.status(503).body("maintenance");
            })
            .await;

        let err = service_for(&server).get_json("/submolts", &[]).await.unwrap_err();

        match err {
            MoltbookServiceError::Status { status, body } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_json_invalid_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/agents");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let err = service_for(&server).get_json("/agents", &[]).await.unwrap_err();

        assert!(matches!(err, MoltbookServiceError::Parse(_)));
    }

    #[tokio::test]
    async fn test_get_json_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/agents");
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(json!({"success": true}));
            })
            .await;

        let err = service_for(&server).get_json("/agents", &[]).await.unwrap_err();

        assert!(matches!(err, MoltbookServiceError::Http(ref e) if e.is_timeout()));
    }
}
