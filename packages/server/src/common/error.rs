use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the auth, upload and avatar flows
///
/// Every variant except `Internal` carries a message that is safe to show to
/// the caller. Internal errors are logged and replaced by a generic message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid or expired OTP")]
    InvalidCredential,

    #[error("OTP has expired")]
    Expired,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid file type. Only JPEG, PNG, and WebP are allowed")]
    UnsupportedMediaType,

    #[error("File too large. Maximum size is {max_bytes} bytes")]
    PayloadTooLarge { max_bytes: usize },

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredential
            | ApiError::Expired
            | ApiError::UnsupportedMediaType
            | ApiError::PayloadTooLarge { .. }
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client in the `detail` field
    pub fn detail(&self) -> String {
        match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            tracing::error!(error = ?e, "Request failed with internal error");
        }

        let body = Json(json!({ "detail": self.detail() }));
        (self.status(), body).into_response()
    }
}

// Malformed request bodies get the same `detail` shape as every other error
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
