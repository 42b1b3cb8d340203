//! Gemini service for Google Gemini API interactions
//!
//! Thin REST client over `generateContent` and the model listing. The
//! service owns one `reqwest::Client` for the process lifetime; callers
//! decide what to do with errors.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::GeminiSettings;
use crate::schemas::gemini::{GeminiError, GeminiRequest, GeminiResponse, ModelInfo, ModelList};
use crate::services::credentials::Credential;

const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when calling the Gemini API
#[derive(Error, Debug)]
pub enum GeminiServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {code} - {message}")]
    Api { code: i32, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Response contained no text")]
    EmptyResponse,
}

impl GeminiServiceError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GeminiServiceError::Http(e) if e.is_timeout())
    }
}

// ============================================================================
// Gemini Service
// ============================================================================

/// Service for interacting with Google Gemini API
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    base_url: String,
    model: String,
    credential: Credential,
}

impl GeminiService {
    /// Create a new Gemini service
    ///
    /// No timeout is set unless `timeout_seconds` is configured.
    pub fn new(settings: &GeminiSettings, credential: Credential) -> Result<Self, GeminiServiceError> {
        let mut builder = Client::builder();
        if let Some(seconds) = settings.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        tracing::info!(
            model = %settings.model,
            base_url = %settings.base_url,
            timeout_seconds = ?settings.timeout_seconds,
            "Initialized Gemini service"
        );

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            credential,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a reply for a single prompt (non-streaming)
    ///
    /// Returns the first candidate's text exactly as the upstream sent it.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GeminiServiceError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = GeminiRequest::from_prompt(prompt);

        tracing::debug!(
            model = %self.model,
            url = %url,
            prompt_chars = prompt.chars().count(),
            "Calling Gemini generateContent API"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.credential.expose())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, body));
        }

        let parsed: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| GeminiServiceError::Parse(e.to_string()))?;

        parsed.text().ok_or(GeminiServiceError::EmptyResponse)
    }

    /// List every model visible to the configured key, following pagination
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, GeminiServiceError> {
        let url = format!("{}/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&url)
                .header(API_KEY_HEADER, self.credential.expose());
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(api_error(status, body));
            }

            let page: ModelList =
                serde_json::from_str(&body).map_err(|e| GeminiServiceError::Parse(e.to_string()))?;
            models.extend(page.models);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(models)
    }
}

/// Map a non-success response to an API error, preferring Gemini's own envelope
fn api_error(status: reqwest::StatusCode, body: String) -> GeminiServiceError {
    match serde_json::from_str::<GeminiError>(&body) {
        Ok(gemini_error) => GeminiServiceError::Api {
            code: gemini_error.error.code,
            message: gemini_error.error.message,
        },
        Err(_) => GeminiServiceError::Api {
            code: status.as_u16() as i32,
            message: body,
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
