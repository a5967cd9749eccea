//! OTP login endpoints

use axum::{extract::Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::ApiError;
use crate::domains::auth::{send_otp, verify_otp};
use crate::server::app::AxumAppState;
use crate::server::extract::ApiJson;

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub phone_number: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone_number: String,
    pub otp_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub success: bool,
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    pub user_id: String,
}

/// POST /auth/send-otp
pub async fn send_otp_handler(
    Extension(state): Extension<AxumAppState>,
    ApiJson(body): ApiJson<SendOtpRequest>,
) -> Result<Json<SendOtpResponse>, ApiError> {
    let issued = send_otp(&body.phone_number, &state.server_deps).await?;

    let message = if state.server_deps.config.otp_echo_enabled {
        format!(
            "OTP sent successfully to {}. (Mock OTP: {})",
            body.phone_number, issued.code
        )
    } else {
        format!("OTP sent successfully to {}", body.phone_number)
    };

    Ok(Json(SendOtpResponse {
        success: true,
        message,
        expires_at: issued.expires_at,
    }))
}

/// POST /auth/verify-otp
pub async fn verify_otp_handler(
    Extension(state): Extension<AxumAppState>,
    ApiJson(body): ApiJson<VerifyOtpRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let login = verify_otp(&body.phone_number, &body.otp_code, &state.server_deps).await?;

    Ok(Json(TokenResponse {
        success: true,
        message: "Login successful".to_string(),
        access_token: login.access_token,
        token_type: "bearer".to_string(),
        user_id: login.user_id,
    }))
}
