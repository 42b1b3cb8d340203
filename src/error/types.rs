//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Inbound body or query could not be decoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream call failed and the route reports it as a server error
    #[error("{0}")]
    UpstreamFailure(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UpstreamFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::InvalidRequest(msg) | ApiError::UpstreamFailure(msg) => msg,
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}
