use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Failure of a request after it reached a handler.
///
/// Server side failures only show the status and its canonical reason to the
/// client, details stay in the logs. A rejected body tells the client what was
/// wrong with it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] anyhow::Error),

    #[error("{operation} did not complete within {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("catalog store task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    #[error("rejected request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Store(_) | ApiError::TaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body(rejection) => rejection.status(),
        }
    }

    /// Label used for the store error counter.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Store(_) => "store",
            ApiError::Timeout { .. } => "timeout",
            ApiError::TaskFailed(_) => "task",
            ApiError::Body(_) => "body",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Body(rejection) => rejection.body_text(),
            _ => status.canonical_reason().unwrap_or("Error").to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
