use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
///
/// Built once at startup and handed to the components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_name: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_algorithm: String,
    pub jwt_expiration_hours: i64,
    pub jwt_issuer: String,
    pub upload_dir: PathBuf,
    pub max_upload_size: usize,
    /// Echo the generated OTP in the send-otp response (no SMS gateway exists)
    pub otp_echo_enabled: bool,
    /// Simulated processing time of the avatar generator
    pub avatar_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            database_url: var_or("DATABASE_URL", "postgres://localhost:5432"),
            database_name: var_or("DATABASE_NAME", "virtual_try_on"),
            port: var_or("PORT", "8000")
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: lookup("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_algorithm: var_or("JWT_ALGORITHM", "HS256"),
            jwt_expiration_hours: var_or("JWT_EXPIRATION_HOURS", "24")
                .parse()
                .context("JWT_EXPIRATION_HOURS must be a whole number of hours")?,
            jwt_issuer: var_or("JWT_ISSUER", "tryon-server"),
            upload_dir: PathBuf::from(var_or("UPLOAD_DIR", "uploads")),
            max_upload_size: var_or("MAX_UPLOAD_SIZE", "10485760")
                .parse()
                .context("MAX_UPLOAD_SIZE must be a byte count")?,
            otp_echo_enabled: var_or("OTP_ECHO_ENABLED", "true")
                .parse()
                .context("OTP_ECHO_ENABLED must be true or false")?,
            avatar_delay_ms: var_or("AVATAR_DELAY_MS", "2000")
                .parse()
                .context("AVATAR_DELAY_MS must be a number of milliseconds")?,
        })
    }
}
