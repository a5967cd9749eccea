//! Avatar generation endpoints (mocked)

use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::common::ApiError;
use crate::domains::avatar::{
    available_models, avatar_styles, generate_avatar, AiModel, AvatarRequest, AvatarStyle,
};
use crate::server::app::AxumAppState;
use crate::server::extract::ApiJson;

#[derive(Debug, Serialize, Deserialize)]
pub struct AvatarResponse {
    pub success: bool,
    pub message: String,
    pub avatar_url: String,
    pub processing_time: f64,
    pub request_id: String,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<AiModel>,
}

#[derive(Debug, Serialize)]
pub struct StylesResponse {
    pub styles: Vec<AvatarStyle>,
}

/// POST /ai/generate-avatar
pub async fn generate_avatar_handler(
    Extension(state): Extension<AxumAppState>,
    ApiJson(request): ApiJson<AvatarRequest>,
) -> Result<Json<AvatarResponse>, ApiError> {
    let avatar = generate_avatar(&request, &state.server_deps).await?;

    Ok(Json(AvatarResponse {
        success: true,
        message: "Avatar generated successfully! (This is a mock response)".to_string(),
        avatar_url: avatar.avatar_url,
        processing_time: avatar.processing_time,
        request_id: avatar.request_id,
    }))
}

/// GET /ai/models
pub async fn models_handler() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: available_models(),
    })
}

/// GET /ai/styles
pub async fn styles_handler() -> Json<StylesResponse> {
    Json(StylesResponse {
        styles: avatar_styles(),
    })
}
