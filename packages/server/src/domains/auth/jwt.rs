use std::str::FromStr;

use anyhow::{bail, Context, Result};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::Config;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,          // Subject (user_id)
    pub user_id: String,      // Opaque user identifier
    pub phone_number: String, // Phone number the login was proven for
    pub exp: i64,             // Expiration timestamp
    pub iat: i64,             // Issued at timestamp
    pub iss: String,          // Issuer
    pub jti: String,          // JWT ID (unique token identifier)
}

/// Why a token was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid,
}

/// JWT Service - creates and verifies session tokens
///
/// Stateless: verification only checks signature, issuer and expiry.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    ttl: chrono::Duration,
}

impl JwtService {
    /// Create new JWT service with secret, algorithm, issuer and default lifetime
    pub fn new(
        secret: &str,
        algorithm: Algorithm,
        issuer: String,
        ttl: chrono::Duration,
    ) -> Result<Self> {
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            bail!("unsupported JWT algorithm {:?}: only HMAC algorithms work with a shared secret", algorithm);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            issuer,
            ttl,
        })
    }

    /// Create the service from application config
    pub fn from_config(config: &Config) -> Result<Self> {
        let algorithm = Algorithm::from_str(&config.jwt_algorithm)
            .with_context(|| format!("unknown JWT_ALGORITHM {}", config.jwt_algorithm))?;

        Self::new(
            &config.jwt_secret,
            algorithm,
            config.jwt_issuer.clone(),
            chrono::Duration::hours(config.jwt_expiration_hours),
        )
    }

    /// Create a token with the configured lifetime
    pub fn create_token(&self, user_id: &str, phone_number: &str) -> Result<String> {
        self.create_token_with_ttl(user_id, phone_number, self.ttl)
    }

    /// Create a token expiring `ttl` from now
    pub fn create_token_with_ttl(
        &self,
        user_id: &str,
        phone_number: &str,
        ttl: chrono::Duration,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + ttl;

        let claims = Claims {
            sub: user_id.to_string(),
            user_id: user_id.to_string(),
            phone_number: phone_number.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(), // Unique token ID
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a token
    ///
    /// Returns claims if the signature, issuer and expiry check out.
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
