//! Chat endpoint
//!
//! POST /chat relays the message to Gemini. Outcomes are always encoded in
//! the reply body, unless the failure mode is `status`, in which case an
//! upstream failure becomes HTTP 500.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::config::ChatFailureMode;
use crate::error::ApiError;
use crate::schemas::chat::{ChatRequest, ChatResult};
use crate::server::state::AppState;
use crate::services::ChatOutcome;

/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;

    let outcome = state.chat.chat(&request.message).await;

    if outcome == ChatOutcome::Failed && state.settings.chat_failure_mode == ChatFailureMode::Status {
        return Err(ApiError::UpstreamFailure(outcome.text().to_string()));
    }

    Ok(Json(ChatResult::new(
        state.settings.chat_response_style,
        outcome.text(),
    )))
}
