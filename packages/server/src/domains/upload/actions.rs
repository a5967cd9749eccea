//! Upload photo action

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::user::User;
use crate::kernel::ServerDeps;

/// Accepted content types and the extension used when the filename has none
pub const ALLOWED_CONTENT_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

/// Public path prefix uploaded files are served under
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// A photo as received from the client
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Where an accepted photo ended up
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPhoto {
    pub file_url: String,
    pub file_id: String,
}

/// Reject anything that isn't JPEG, PNG or WebP
pub fn validate_content_type(content_type: &str) -> Result<(), ApiError> {
    if ALLOWED_CONTENT_TYPES
        .iter()
        .any(|(allowed, _)| *allowed == content_type)
    {
        Ok(())
    } else {
        Err(ApiError::UnsupportedMediaType)
    }
}

/// Reject payloads above the configured maximum
pub fn validate_size(len: usize, max_bytes: usize) -> Result<(), ApiError> {
    if len > max_bytes {
        Err(ApiError::PayloadTooLarge { max_bytes })
    } else {
        Ok(())
    }
}

/// Extension for the stored file: the original one if it looks sane,
/// otherwise the one matching the content type.
fn file_extension(file_name: Option<&str>, content_type: &str) -> String {
    let original = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match original {
        Some(ext) => ext.to_string(),
        None => ALLOWED_CONTENT_TYPES
            .iter()
            .find(|(allowed, _)| *allowed == content_type)
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_default(),
    }
}

/// Validate and store a photo for `user`, then record it on the user.
///
/// The file is written in full before the user row is touched, so a failed
/// write never leaves a dangling reference.
pub async fn upload_photo(
    user: &User,
    upload: PhotoUpload,
    deps: &ServerDeps,
) -> Result<StoredPhoto, ApiError> {
    validate_content_type(&upload.content_type)?;
    validate_size(upload.data.len(), deps.config.max_upload_size)?;

    let file_id = Uuid::new_v4().to_string();
    let extension = file_extension(upload.file_name.as_deref(), &upload.content_type);
    let stored_name = if extension.is_empty() {
        file_id.clone()
    } else {
        format!("{}.{}", file_id, extension)
    };

    deps.photo_storage
        .put(&stored_name, &upload.data)
        .await
        .with_context(|| format!("Failed to store photo for user {}", user.user_id))?;

    let file_url = format!("{}/{}", UPLOADS_URL_PREFIX, stored_name);

    let updated = deps
        .store
        .append_photo(&user.user_id, &file_url, Utc::now())
        .await
        .context("Failed to record photo on user")?;
    if !updated {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    info!(
        "Photo uploaded successfully for user {}: {}",
        user.user_id, file_url
    );

    Ok(StoredPhoto { file_url, file_id })
}
