//! Verify OTP action

use anyhow::Context;
use chrono::Utc;
use tracing::{info, warn};

use crate::common::ApiError;
use crate::domains::user::User;
use crate::kernel::ServerDeps;

/// Result of a successful OTP login
#[derive(Debug, Clone)]
pub struct VerifiedLogin {
    pub user_id: String,
    pub phone_number: String,
    pub access_token: String,
    /// True when this login created the user
    pub new_user: bool,
}

/// Verify an OTP code, resolve or create the user, and issue a session token.
///
/// The code is consumed with a conditional update, so two concurrent
/// submissions of the same code cannot both log in.
pub async fn verify_otp(
    phone_number: &str,
    code: &str,
    deps: &ServerDeps,
) -> Result<VerifiedLogin, ApiError> {
    let otp = deps
        .store
        .find_unconsumed_code(phone_number, code)
        .await
        .context("Failed to look up OTP")?
        .ok_or(ApiError::InvalidCredential)?;

    if otp.is_expired_at(Utc::now()) {
        info!(phone_number, "Rejected expired OTP");
        return Err(ApiError::Expired);
    }

    let consumed = deps
        .store
        .consume_code(otp.id)
        .await
        .context("Failed to consume OTP")?;
    if !consumed {
        warn!(phone_number, "OTP consumed by a concurrent request");
        return Err(ApiError::InvalidCredential);
    }

    // Find or create user
    let (user, new_user) = match deps
        .store
        .find_user_by_phone(phone_number)
        .await
        .context("Failed to look up user")?
    {
        Some(user) => (user, false),
        None => {
            let candidate = User::new(phone_number, Utc::now());
            let stored = deps
                .store
                .insert_user_if_absent(&candidate)
                .await
                .context("Failed to create user")?;
            let created = stored.user_id == candidate.user_id;
            if created {
                info!("Created new user {} for {}", stored.user_id, phone_number);
            }
            (stored, created)
        }
    };

    let access_token = deps
        .jwt_service
        .create_token(&user.user_id, phone_number)
        .context("Failed to create access token")?;

    info!("OTP verified for user {}", user.user_id);

    Ok(VerifiedLogin {
        user_id: user.user_id,
        phone_number: phone_number.to_string(),
        access_token,
        new_user,
    })
}
