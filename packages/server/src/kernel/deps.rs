//! Server dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container used by all domain actions.
//! All external services use trait abstractions to enable testing.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::domains::auth::{JwtService, OneTimeCode};
use crate::domains::user::User;
use crate::kernel::{BaseCredentialStore, BasePhotoStorage, BaseProcessingDelay};
use crate::Config;

// =============================================================================
// Postgres Adapter (implements BaseCredentialStore trait)
// =============================================================================

/// Credential store backed by Postgres; SQL lives on the models
#[derive(Clone)]
pub struct PostgresCredentialStore(pub PgPool);

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self(pool)
    }
}

#[async_trait]
impl BaseCredentialStore for PostgresCredentialStore {
    async fn delete_codes_for_phone(&self, phone_number: &str) -> Result<u64> {
        OneTimeCode::delete_for_phone(phone_number, &self.0).await
    }

    async fn insert_code(&self, code: &OneTimeCode) -> Result<()> {
        code.insert(&self.0).await
    }

    async fn find_unconsumed_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<Option<OneTimeCode>> {
        OneTimeCode::find_unconsumed(phone_number, code, &self.0).await
    }

    async fn consume_code(&self, id: Uuid) -> Result<bool> {
        OneTimeCode::mark_consumed(id, &self.0).await
    }

    async fn purge_expired_codes(&self, now: DateTime<Utc>) -> Result<u64> {
        OneTimeCode::delete_expired(now, &self.0).await
    }

    async fn find_user_by_phone(&self, phone_number: &str) -> Result<Option<User>> {
        User::find_by_phone(phone_number, &self.0).await
    }

    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>> {
        User::find_by_id(user_id, &self.0).await
    }

    async fn insert_user_if_absent(&self, user: &User) -> Result<User> {
        user.insert_if_absent(&self.0).await
    }

    async fn append_photo(
        &self,
        user_id: &str,
        reference: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        User::append_photo(user_id, reference, updated_at, &self.0).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.0).await?;
        Ok(())
    }
}

// =============================================================================
// Sleep-based delay (implements BaseProcessingDelay trait)
// =============================================================================

/// Real wall-clock wait used in production
pub struct SleepDelay(pub Duration);

#[async_trait]
impl BaseProcessingDelay for SleepDelay {
    async fn wait(&self) {
        tokio::time::sleep(self.0).await;
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseCredentialStore>,
    pub photo_storage: Arc<dyn BasePhotoStorage>,
    pub avatar_delay: Arc<dyn BaseProcessingDelay>,
    /// JWT service for token creation
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        store: Arc<dyn BaseCredentialStore>,
        photo_storage: Arc<dyn BasePhotoStorage>,
        avatar_delay: Arc<dyn BaseProcessingDelay>,
        jwt_service: Arc<JwtService>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            store,
            photo_storage,
            avatar_delay,
            jwt_service,
            config,
        }
    }
}
