//! Photo upload endpoint

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Extension, Multipart,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::ApiError;
use crate::domains::upload::{upload_photo, validate_content_type, validate_size, PhotoUpload};
use crate::domains::user::require_active_user;
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

/// Multipart field carrying the photo
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub file_url: String,
    pub file_id: String,
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { max_bytes }
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

/// POST /upload/photo
pub async fn upload_photo_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let deps = &state.server_deps;
    let max_bytes = deps.config.max_upload_size;

    let user = require_active_user(&auth_user.user_id, deps).await?;
    let mut multipart = multipart?;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        validate_content_type(&content_type)?;
        let file_name = field.file_name().map(str::to_string);

        // Stop reading as soon as the limit is crossed
        let mut data = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, max_bytes))?
        {
            data.extend_from_slice(&chunk);
            validate_size(data.len(), max_bytes)?;
        }

        let stored = upload_photo(
            &user,
            PhotoUpload {
                file_name,
                content_type,
                data,
            },
            deps,
        )
        .await?;

        return Ok(Json(UploadResponse {
            success: true,
            message: "Photo uploaded successfully".to_string(),
            file_url: stored.file_url,
            file_id: stored.file_id,
        }));
    }

    Err(ApiError::BadRequest(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}
