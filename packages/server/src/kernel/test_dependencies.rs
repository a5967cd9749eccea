// TestDependencies - in-memory implementations for testing
//
// Provides stand-in services that can be injected into ServerDeps for tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::{BaseCredentialStore, BasePhotoStorage, BaseProcessingDelay, ServerDeps};
use crate::domains::auth::{JwtService, OneTimeCode};
use crate::domains::user::User;
use crate::Config;

// =============================================================================
// In-memory Credential Store
// =============================================================================

/// Credential store over two vectors.
///
/// Every trait method takes the lock once, so each call is atomic the same
/// way a single SQL statement is.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    codes: Mutex<Vec<OneTimeCode>>,
    users: Mutex<Vec<User>>,
    unavailable: Mutex<bool>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail, as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    fn check_available(&self) -> Result<()> {
        if *self.unavailable.lock().unwrap() {
            return Err(anyhow!("credential store unavailable"));
        }
        Ok(())
    }

    /// All code rows for a phone number, consumed or not
    pub fn codes_for_phone(&self, phone_number: &str) -> Vec<OneTimeCode> {
        self.codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.phone_number == phone_number)
            .cloned()
            .collect()
    }

    /// Move creation and expiry of a phone number's codes into the past
    pub fn backdate_codes(&self, phone_number: &str, by: Duration) {
        for code in self
            .codes
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|c| c.phone_number == phone_number)
        {
            code.created_at -= by;
            code.expires_at -= by;
        }
    }

    /// Insert a code row as-is, bypassing the issuance flow
    pub fn seed_code(&self, code: OneTimeCode) {
        self.codes.lock().unwrap().push(code);
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    pub fn user(&self, user_id: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned()
    }

    pub fn seed_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn set_user_active(&self, user_id: &str, is_active: bool) {
        if let Some(user) = self
            .users
            .lock()
            .unwrap()
            .iter_mut()
            .find(|u| u.user_id == user_id)
        {
            user.is_active = is_active;
        }
    }

    pub fn remove_user(&self, user_id: &str) {
        self.users.lock().unwrap().retain(|u| u.user_id != user_id);
    }
}

#[async_trait]
impl BaseCredentialStore for InMemoryCredentialStore {
    async fn delete_codes_for_phone(&self, phone_number: &str) -> Result<u64> {
        self.check_available()?;
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| c.phone_number != phone_number);
        Ok((before - codes.len()) as u64)
    }

    async fn insert_code(&self, code: &OneTimeCode) -> Result<()> {
        self.check_available()?;
        self.codes.lock().unwrap().push(code.clone());
        Ok(())
    }

    async fn find_unconsumed_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<Option<OneTimeCode>> {
        self.check_available()?;
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.phone_number == phone_number && c.code == code && !c.consumed)
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn consume_code(&self, id: Uuid) -> Result<bool> {
        self.check_available()?;
        let mut codes = self.codes.lock().unwrap();
        match codes.iter_mut().find(|c| c.id == id && !c.consumed) {
            Some(code) => {
                code.consumed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn purge_expired_codes(&self, now: DateTime<Utc>) -> Result<u64> {
        self.check_available()?;
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| !c.is_expired_at(now));
        Ok((before - codes.len()) as u64)
    }

    async fn find_user_by_phone(&self, phone_number: &str) -> Result<Option<User>> {
        self.check_available()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>> {
        self.check_available()?;
        Ok(self.user(user_id))
    }

    async fn insert_user_if_absent(&self, user: &User) -> Result<User> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter().find(|u| u.phone_number == user.phone_number) {
            return Ok(existing.clone());
        }
        if users.iter().any(|u| u.user_id == user.user_id) {
            return Err(anyhow!("duplicate user_id {}", user.user_id));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn append_photo(
        &self,
        user_id: &str,
        reference: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.check_available()?;
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.user_id == user_id) {
            Some(user) => {
                user.profile_photos.push(reference.to_string());
                user.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}

// =============================================================================
// Mock Photo Storage
// =============================================================================

/// Keeps written photos in memory; can be told to fail every write
#[derive(Default)]
pub struct MockPhotoStorage {
    files: Mutex<Vec<(String, Vec<u8>)>>,
    fail_writes: bool,
}

impl MockPhotoStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose writes always fail (disk full, permissions, ...)
    pub fn failing() -> Self {
        Self {
            files: Mutex::new(Vec::new()),
            fail_writes: true,
        }
    }

    /// Names of all stored files, in write order
    pub fn stored_names(&self) -> Vec<String> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn contents(&self, name: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.clone())
    }
}

#[async_trait]
impl BasePhotoStorage for MockPhotoStorage {
    async fn put(&self, name: &str, data: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(anyhow!("mock write failure for {}", name));
        }
        self.files
            .lock()
            .unwrap()
            .push((name.to_string(), data.to_vec()));
        Ok(())
    }
}

// =============================================================================
// No-op delay
// =============================================================================

/// Returns immediately so avatar tests don't wait on the wall clock
pub struct NoDelay;

#[async_trait]
impl BaseProcessingDelay for NoDelay {
    async fn wait(&self) {}
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

pub const TEST_JWT_SECRET: &str = "test_secret_key";

/// Config with test-friendly values (small upload limit, no avatar delay)
pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost:5432".to_string(),
        database_name: "virtual_try_on_test".to_string(),
        port: 0,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_algorithm: "HS256".to_string(),
        jwt_expiration_hours: 24,
        jwt_issuer: "test_issuer".to_string(),
        upload_dir: PathBuf::from("uploads"),
        max_upload_size: 1024,
        otp_echo_enabled: true,
        avatar_delay_ms: 0,
    }
}

#[derive(Clone)]
pub struct TestDependencies {
    pub store: Arc<InMemoryCredentialStore>,
    pub photo_storage: Arc<MockPhotoStorage>,
    pub config: Config,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryCredentialStore::new()),
            photo_storage: Arc::new(MockPhotoStorage::new()),
            config: test_config(),
        }
    }

    /// Set a mock photo storage
    pub fn mock_photo_storage(mut self, storage: MockPhotoStorage) -> Self {
        self.photo_storage = Arc::new(storage);
        self
    }

    /// Override the upload size limit
    pub fn max_upload_size(mut self, bytes: usize) -> Self {
        self.config.max_upload_size = bytes;
        self
    }

    /// Build the ServerDeps the actions run against
    pub fn server_deps(&self) -> ServerDeps {
        let jwt_service = JwtService::from_config(&self.config)
            .unwrap_or_else(|e| panic!("test config must produce a JwtService: {e}"));

        ServerDeps::new(
            self.store.clone(),
            self.photo_storage.clone(),
            Arc::new(NoDelay),
            Arc::new(jwt_service),
            Arc::new(self.config.clone()),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
