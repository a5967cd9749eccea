use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Digits in every one-time code
pub const OTP_LENGTH: usize = 6;

/// How long a one-time code stays valid
pub const OTP_TTL_MINUTES: i64 = 10;

/// OneTimeCode - a login code issued for a phone number
///
/// At most one code per phone number is meant to be live; issuing a new one
/// deletes the old ones. Consumed codes are never accepted again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OneTimeCode {
    pub id: Uuid,
    pub phone_number: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
}

impl OneTimeCode {
    /// Build an unconsumed code expiring `OTP_TTL_MINUTES` after `now`
    pub fn issue(phone_number: &str, code: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            phone_number: phone_number.to_string(),
            code,
            created_at: now,
            expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
            consumed: false,
        }
    }

    /// A code is expired from its expiry instant onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl OneTimeCode {
    /// Delete every code issued for a phone number
    pub async fn delete_for_phone(phone_number: &str, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM one_time_codes WHERE phone_number = $1")
            .bind(phone_number)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Insert this code
    pub async fn insert(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO one_time_codes (id, phone_number, code, created_at, expires_at, consumed)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(self.id)
        .bind(&self.phone_number)
        .bind(&self.code)
        .bind(self.created_at)
        .bind(self.expires_at)
        .bind(self.consumed)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find an unconsumed code matching phone number and code exactly.
    ///
    /// Expired rows are returned too so the caller can tell "expired" apart
    /// from "wrong code".
    pub async fn find_unconsumed(
        phone_number: &str,
        code: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM one_time_codes
            WHERE phone_number = $1 AND code = $2 AND consumed = false
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(phone_number)
        .bind(code)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Mark a code consumed if nobody else did first.
    ///
    /// Returns true only for the caller whose update flipped the flag.
    pub async fn mark_consumed(id: Uuid, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE one_time_codes SET consumed = true WHERE id = $1 AND consumed = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Delete codes whose expiry is at or before `now`
    pub async fn delete_expired(now: DateTime<Utc>, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM one_time_codes WHERE expires_at <= $1")
            .bind(now)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_sets_ten_minute_expiry() {
        let now = Utc::now();
        let otp = OneTimeCode::issue("+1555", "123456".to_string(), now);

        assert_eq!(otp.expires_at - otp.created_at, Duration::minutes(10));
        assert!(!otp.consumed);
        assert_eq!(otp.phone_number, "+1555");
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let otp = OneTimeCode::issue("+1555", "123456".to_string(), now);

        assert!(!otp.is_expired_at(now));
        assert!(!otp.is_expired_at(otp.expires_at - Duration::seconds(1)));
        // The expiry instant itself is already expired
        assert!(otp.is_expired_at(otp.expires_at));
        assert!(otp.is_expired_at(otp.expires_at + Duration::seconds(1)));
    }
}
