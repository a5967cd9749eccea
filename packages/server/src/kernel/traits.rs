// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "verify an OTP") lives in domain actions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseCredentialStore, BasePhotoStorage)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domains::auth::OneTimeCode;
use crate::domains::user::User;

// =============================================================================
// Credential Store Trait (Infrastructure - users and one-time codes)
// =============================================================================

/// Persistence for users and one-time codes.
///
/// Each method is a single atomic storage operation; flows never hold locks
/// across calls, so read-modify-write safety comes from the conditional
/// operations (`consume_code`, `insert_user_if_absent`).
#[async_trait]
pub trait BaseCredentialStore: Send + Sync {
    /// Delete every code for a phone number, returning how many were removed
    async fn delete_codes_for_phone(&self, phone_number: &str) -> Result<u64>;

    async fn insert_code(&self, code: &OneTimeCode) -> Result<()>;

    /// Find an unconsumed code for phone + code, expired or not
    async fn find_unconsumed_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<Option<OneTimeCode>>;

    /// Flip `consumed` to true; false means someone else consumed it first
    async fn consume_code(&self, id: Uuid) -> Result<bool>;

    /// Remove codes expiring at or before `now`
    async fn purge_expired_codes(&self, now: DateTime<Utc>) -> Result<u64>;

    async fn find_user_by_phone(&self, phone_number: &str) -> Result<Option<User>>;

    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>>;

    /// Insert unless the phone number is taken; returns the stored user
    async fn insert_user_if_absent(&self, user: &User) -> Result<User>;

    /// Append a photo reference; false means the user does not exist
    async fn append_photo(
        &self,
        user_id: &str,
        reference: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// Cheap round trip used by the health check
    async fn ping(&self) -> Result<()>;
}

// =============================================================================
// Photo Storage Trait (Infrastructure - upload bytes)
// =============================================================================

#[async_trait]
pub trait BasePhotoStorage: Send + Sync {
    /// Write the whole payload under `name`; either all bytes land or an error is returned
    async fn put(&self, name: &str, data: &[u8]) -> Result<()>;
}

// =============================================================================
// Processing Delay Trait (Infrastructure - avatar stub latency)
// =============================================================================

#[async_trait]
pub trait BaseProcessingDelay: Send + Sync {
    /// Wait for the simulated processing time
    async fn wait(&self);
}
