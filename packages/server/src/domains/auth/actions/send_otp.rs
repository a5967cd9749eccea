//! Send OTP action

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::common::utils::generate_numeric_code;
use crate::common::ApiError;
use crate::domains::auth::models::{OneTimeCode, OTP_LENGTH};
use crate::kernel::ServerDeps;

/// Result of issuing an OTP
#[derive(Debug, Clone)]
pub struct OtpIssued {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Issue a fresh one-time code for a phone number.
///
/// Previous codes for the number are deleted first, so only the newest code
/// can be verified. There is no SMS gateway; the caller decides whether to
/// echo the code back.
pub async fn send_otp(phone_number: &str, deps: &ServerDeps) -> Result<OtpIssued, ApiError> {
    let code = generate_numeric_code(OTP_LENGTH);
    let otp = OneTimeCode::issue(phone_number, code, Utc::now());

    let replaced = deps
        .store
        .delete_codes_for_phone(phone_number)
        .await
        .context("Failed to clear previous OTPs")?;

    deps.store
        .insert_code(&otp)
        .await
        .context("Failed to store OTP")?;

    info!(
        phone_number,
        replaced,
        expires_at = %otp.expires_at,
        "OTP issued"
    );
    debug!(phone_number, code = %otp.code, "Mock OTP delivery");

    Ok(OtpIssued {
        code: otp.code,
        expires_at: otp.expires_at,
    })
}
