use crate::common::ApiError;
use crate::domains::auth::{JwtService, TokenError};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Authenticated user information from JWT
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub user_id: String,
    pub phone_number: String,
}

/// Why a presented token was not accepted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthFailure {
    MalformedHeader,
    InvalidToken,
    ExpiredToken,
}

impl AuthFailure {
    fn message(self) -> &'static str {
        match self {
            AuthFailure::MalformedHeader => "Invalid authorization header",
            AuthFailure::InvalidToken => "Invalid token",
            AuthFailure::ExpiredToken => "Token has expired",
        }
    }
}

/// JWT authentication middleware
///
/// Verifies a `Bearer` token and adds AuthUser to request extensions.
/// Requests without a valid token continue unauthenticated; handlers that
/// need a user reject them through the `AuthUser` extractor.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match extract_auth_user(&request, &jwt_service) {
        Some(Ok(user)) => {
            debug!("Authenticated user: {}", user.user_id);
            request.extensions_mut().insert(user);
        }
        Some(Err(failure)) => {
            debug!("Rejected authentication token: {:?}", failure);
            request.extensions_mut().insert(failure);
        }
        None => {}
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
///
/// `None` when no Authorization header is present at all.
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<Result<AuthUser, AuthFailure>> {
    let auth_header = request.headers().get(AUTHORIZATION)?;

    let token = match auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
    {
        Some(token) if !token.is_empty() => token,
        _ => return Some(Err(AuthFailure::MalformedHeader)),
    };

    Some(
        jwt_service
            .verify_token(token)
            .map(|claims| AuthUser {
                user_id: claims.user_id,
                phone_number: claims.phone_number,
            })
            .map_err(|e| match e {
                TokenError::Expired => AuthFailure::ExpiredToken,
                TokenError::Invalid => AuthFailure::InvalidToken,
            }),
    )
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let message = parts
            .extensions
            .get::<AuthFailure>()
            .map(|failure| failure.message())
            .unwrap_or("Not authenticated");
        Err(ApiError::Unauthorized(message.to_string()))
    }
}
