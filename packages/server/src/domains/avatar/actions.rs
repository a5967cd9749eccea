//! Generate avatar action (stub)

use std::time::Instant;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::common::ApiError;
use crate::kernel::ServerDeps;

pub const DEFAULT_STYLE: &str = "casual";

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

/// Avatar generation request body
#[derive(Debug, Clone, Deserialize)]
pub struct AvatarRequest {
    pub user_id: String,
    pub photo_urls: Vec<String>,
    #[serde(default = "default_style")]
    pub style: String,
}

/// Placeholder result of a generation run
#[derive(Debug, Clone)]
pub struct GeneratedAvatar {
    pub avatar_url: String,
    /// Seconds spent, including the simulated delay
    pub processing_time: f64,
    pub request_id: String,
}

/// Pretend to generate an avatar for an existing user
pub async fn generate_avatar(
    request: &AvatarRequest,
    deps: &ServerDeps,
) -> Result<GeneratedAvatar, ApiError> {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    info!(
        "Avatar generation request {} for user {} (style: {}, photos: {})",
        request_id,
        request.user_id,
        request.style,
        request.photo_urls.len()
    );

    deps.store
        .find_user_by_id(&request.user_id)
        .await
        .context("Failed to look up user")?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    deps.avatar_delay.wait().await;

    let avatar_url = format!("/avatars/{}.jpg", request_id);
    let processing_time = start.elapsed().as_secs_f64();

    info!(
        "Avatar generated successfully: {} (Processing time: {:.2}s)",
        avatar_url, processing_time
    );

    Ok(GeneratedAvatar {
        avatar_url,
        processing_time,
        request_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::user::User;
    use crate::kernel::TestDependencies;
    use chrono::Utc;

    #[tokio::test]
    async fn test_generate_for_known_user() {
        let test_deps = TestDependencies::new();
        let user = User::new("+1555", Utc::now());
        test_deps.store.seed_user(user.clone());

        let request = AvatarRequest {
            user_id: user.user_id.clone(),
            photo_urls: vec!["/uploads/a.jpg".to_string()],
            style: DEFAULT_STYLE.to_string(),
        };
        let avatar = generate_avatar(&request, &test_deps.server_deps())
            .await
            .unwrap();

        assert_eq!(avatar.avatar_url, format!("/avatars/{}.jpg", avatar.request_id));
        assert!(Uuid::parse_str(&avatar.request_id).is_ok());
        assert!(avatar.processing_time >= 0.0);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let request = AvatarRequest {
            user_id: "ghost".to_string(),
            photo_urls: vec![],
            style: DEFAULT_STYLE.to_string(),
        };
        let result = generate_avatar(&request, &TestDependencies::new().server_deps()).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_style_defaults_to_casual() {
        let request: AvatarRequest =
            serde_json::from_str(r#"{"user_id": "u1", "photo_urls": []}"#).unwrap();
        assert_eq!(request.style, "casual");
    }
}
