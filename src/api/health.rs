//! Status and health check endpoints
//!
//! `/` is the banner the browser client pings; `/health`, `/ready` and
//! `/liveness` are for monitoring and container orchestration.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::state::AppState;
use crate::services::Upstream;

/// Banner returned by the root endpoint
pub const STATUS_BANNER: &str = "Nexus AI Backend Online";

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Response for the main health check endpoint
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: u64,
}

/// Response for readiness probe
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

/// Individual readiness checks
#[derive(Debug, Serialize)]
pub struct ReadinessChecks {
    pub config_loaded: bool,
    pub gemini_configured: bool,
    pub moltbook_configured: bool,
}

/// Response for liveness probe
#[derive(Serialize)]
pub struct LivenessResponse {
    pub alive: bool,
}

/// GET /
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: STATUS_BANNER.to_string(),
    })
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.settings.app_version.clone(),
        environment: state.settings.environment.to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Readiness probe endpoint
///
/// Both upstreams are optional, so a missing credential is reported but
/// never makes the instance unready.
///
/// GET /ready
pub async fn readiness(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let checks = ReadinessChecks {
        config_loaded: true,
        gemini_configured: state.is_configured(Upstream::Gemini),
        moltbook_configured: state.is_configured(Upstream::Moltbook),
    };

    if !checks.gemini_configured || !checks.moltbook_configured {
        tracing::debug!(checks = ?checks, "Some upstreams are disabled (non-critical)");
    }

    Json(ReadinessResponse {
        ready: checks.config_loaded,
        checks,
    })
}

/// GET /liveness
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { alive: true })
}
