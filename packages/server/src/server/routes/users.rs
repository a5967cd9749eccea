use axum::{extract::Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::ApiError;
use crate::domains::user::require_active_user;
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    pub profile_photos: Vec<String>,
}

/// GET /users/me
pub async fn current_user_handler(
    Extension(state): Extension<AxumAppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = require_active_user(&auth_user.user_id, &state.server_deps).await?;

    Ok(Json(UserResponse {
        user_id: user.user_id,
        phone_number: user.phone_number,
        created_at: user.created_at,
        is_active: user.is_active,
        profile_photos: user.profile_photos,
    }))
}
