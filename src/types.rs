// API error type shared across routes

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tracing::error;

/// Error rendered as a `{"detail": "<message>"}` body, the shape existing
/// clients already parse.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    /// 500 carrying the operation name and the backend's error text. The
    /// message is passed through unscrubbed; that is part of the current
    /// client contract.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }

    /// 422 for request bodies/fields rejected before any backend call.
    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: detail.into(),
        }
    }

    pub fn missing_field(field: &str) -> Self {
        Self::unprocessable(format!("field required: {field}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, detail = %self.detail, "request failed");
        }
        (
            self.status,
            Json(serde_json::json!({ "detail": self.detail })),
        )
            .into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
