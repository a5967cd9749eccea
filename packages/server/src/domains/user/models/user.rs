use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::utils::generate_user_id;

/// User model - SQL persistence layer
///
/// One row per verified phone number. `profile_photos` keeps upload
/// references in the order they were added.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
    pub profile_photos: Vec<String>,
}

impl User {
    /// Build a fresh, active user with no photos
    pub fn new(phone_number: &str, now: DateTime<Utc>) -> Self {
        Self {
            user_id: generate_user_id(),
            phone_number: phone_number.to_string(),
            created_at: now,
            updated_at: now,
            is_active: true,
            profile_photos: Vec::new(),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    /// Find user by phone number
    pub async fn find_by_phone(phone_number: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find user by identifier
    pub async fn find_by_id(user_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert unless a user with the same phone number already exists.
    ///
    /// Returns the stored row, which is the existing user when another
    /// request won the race for this phone number.
    pub async fn insert_if_absent(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, phone_number, created_at, updated_at, is_active, profile_photos)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (phone_number) DO NOTHING
            "#,
        )
        .bind(&self.user_id)
        .bind(&self.phone_number)
        .bind(self.created_at)
        .bind(self.updated_at)
        .bind(self.is_active)
        .bind(&self.profile_photos)
        .execute(pool)
        .await?;

        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE phone_number = $1")
            .bind(&self.phone_number)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Append a photo reference and bump `updated_at`.
    ///
    /// Returns false when no user has this identifier.
    pub async fn append_photo(
        user_id: &str,
        reference: &str,
        updated_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET profile_photos = array_append(profile_photos, $2),
                updated_at = $3
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(reference)
        .bind(updated_at)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let now = Utc::now();
        let user = User::new("+15550001", now);

        assert_eq!(user.phone_number, "+15550001");
        assert!(user.is_active);
        assert!(user.profile_photos.is_empty());
        assert_eq!(user.created_at, now);
        assert_eq!(user.updated_at, now);
        assert!(!user.user_id.is_empty());
    }

    #[test]
    fn test_new_users_get_distinct_ids() {
        let now = Utc::now();
        let a = User::new("+15550001", now);
        let b = User::new("+15550001", now);
        assert_ne!(a.user_id, b.user_id);
    }
}
