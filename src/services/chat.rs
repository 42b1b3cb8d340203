//! Chat relay
//!
//! Forwards one user message to Gemini and normalizes the outcome. Upstream
//! failures are logged here and never reach the caller; the caller only sees
//! a [`ChatOutcome`].

use crate::config::GeminiSettings;
use crate::services::credentials::{CredentialGuard, Upstream};
use crate::services::gemini::GeminiService;

/// Reply used when no Gemini key was configured
pub const NOT_CONFIGURED_REPLY: &str = "Backend no configurado: falta la clave de la API de Gemini.";

/// Reply used when the upstream call failed for any reason
pub const FAILURE_REPLY: &str = "Error interno del servidor.";

/// Result of a relayed chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Upstream text, verbatim
    Reply(String),
    NotConfigured,
    Failed,
}

impl ChatOutcome {
    /// Text shown to the client for this outcome
    pub fn text(&self) -> &str {
        match self {
            ChatOutcome::Reply(text) => text,
            ChatOutcome::NotConfigured => NOT_CONFIGURED_REPLY,
            ChatOutcome::Failed => FAILURE_REPLY,
        }
    }
}

#[derive(Clone, Default)]
pub struct ChatRelay {
    gemini: Option<GeminiService>,
}

impl ChatRelay {
    /// Build the relay; without a Gemini credential it stays disabled
    pub fn new(guard: &CredentialGuard, settings: &GeminiSettings) -> Self {
        let gemini = guard.credential(Upstream::Gemini).and_then(|credential| {
            match GeminiService::new(settings, credential.clone()) {
                Ok(service) => Some(service),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to build Gemini client, chat disabled");
                    None
                }
            }
        });

        Self { gemini }
    }

    pub fn is_enabled(&self) -> bool {
        self.gemini.is_some()
    }

    /// Relay a single message; the message is the entire prompt
    pub async fn chat(&self, message: &str) -> ChatOutcome {
        let Some(gemini) = &self.gemini else {
            tracing::warn!("Chat requested but Gemini is not configured");
            return ChatOutcome::NotConfigured;
        };

        tracing::info!(message_chars = message.chars().count(), "Relaying chat message");

        match gemini.generate_content(message).await {
            Ok(text) => {
                tracing::info!(
                    model = %gemini.model(),
                    reply_chars = text.chars().count(),
                    "Chat reply received"
                );
                ChatOutcome::Reply(text)
            }
            Err(e) => {
                tracing::error!(
                    model = %gemini.model(),
                    error = %e,
                    timeout = e.is_timeout(),
                    "Chat relay failed"
                );
                ChatOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::credentials::Credential;
    use httpmock::prelude::*;
    use serde_json::json;

    fn relay_for(server: &MockServer, timeout_seconds: Option<u64>) -> ChatRelay {
        let settings = GeminiSettings {
            base_url: server.base_url(),
            timeout_seconds,
            ..GeminiSettings::default()
        };
        let guard = CredentialGuard::new(Credential::new("test-key"), None);
        ChatRelay::new(&guard, &settings)
    }

    #[tokio::test]
    async fn test_unconfigured_makes_no_call() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.path_contains("/models");
                then.status(200);
            })
            .await;

        let settings = GeminiSettings {
            base_url: server.base_url(),
            ..GeminiSettings::default()
        };
        let relay = ChatRelay::new(&CredentialGuard::default(), &settings);

        let outcome = relay.chat("hi").await;

        assert!(!relay.is_enabled());
        assert_eq!(outcome, ChatOutcome::NotConfigured);
        assert!(outcome.text().starts_with("Backend no configurado"));
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_reply_is_verbatim() {
        let text = "  Línea 1\nLínea 2 <b>negrita</b> \u{1F980}  ";
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/models/gemini-2.5-flash:generateContent");
                then.status(200).json_body(json!({
                    "candidates": [{"content": {"parts": [{"text": text}]}}]
                }));
            })
            .await;

        let outcome = relay_for(&server, None).chat("hola").await;

        assert_eq!(outcome, ChatOutcome::Reply(text.to_string()));
    }

    #[tokio::test]
    async fn test_empty_message_is_forwarded() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .json_body(json!({"contents": [{"role": "user", "parts": [{"text": ""}]}]}));
                then.status(200).json_body(json!({
                    "candidates": [{"content": {"parts": [{"text": "¿Sí?"}]}}]
                }));
            })
            .await;

        let outcome = relay_for(&server, None).chat("").await;

        assert_eq!(outcome, ChatOutcome::Reply("¿Sí?".to_string()));
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_upstream_error_is_absorbed() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(500).json_body(json!({
                    "error": {"code": 500, "message": "internal detail", "status": "INTERNAL"}
                }));
            })
            .await;

        let outcome = relay_for(&server, None).chat("hola").await;

        assert_eq!(outcome, ChatOutcome::Failed);
        assert_eq!(outcome.text(), FAILURE_REPLY);
        assert!(!outcome.text().contains("internal detail"));
        // no retries
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_timeout_is_absorbed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200)
                    .delay(std::time::Duration::from_secs(3))
                    .json_body(json!({"candidates": []}));
            })
            .await;

        let outcome = relay_for(&server, Some(1)).chat("hola").await;

        assert_eq!(outcome, ChatOutcome::Failed);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_absorbed() {
        let settings = GeminiSettings {
            // nothing listens on the discard port
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: Some(2),
            ..GeminiSettings::default()
        };
        let guard = CredentialGuard::new(Credential::new("test-key"), None);

        let outcome = ChatRelay::new(&guard, &settings).chat("hola").await;

        assert_eq!(outcome, ChatOutcome::Failed);
    }
}
