//! User domain actions

use anyhow::Context;

use crate::common::ApiError;
use crate::domains::user::User;
use crate::kernel::ServerDeps;

/// Resolve the user behind a verified token.
///
/// The token only proves a past login; the account must still exist and be
/// active for the request to proceed.
pub async fn require_active_user(user_id: &str, deps: &ServerDeps) -> Result<User, ApiError> {
    let user = deps
        .store
        .find_user_by_id(user_id)
        .await
        .context("Failed to look up user")?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if !user.is_active {
        return Err(ApiError::Unauthorized("User account is inactive".to_string()));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::TestDependencies;
    use chrono::Utc;

    #[tokio::test]
    async fn test_active_user_resolves() {
        let test_deps = TestDependencies::new();
        let user = User::new("+1555", Utc::now());
        test_deps.store.seed_user(user.clone());

        let found = require_active_user(&user.user_id, &test_deps.server_deps())
            .await
            .unwrap();
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let deps = TestDependencies::new().server_deps();
        let result = require_active_user("nobody", &deps).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_inactive_user_is_unauthorized() {
        let test_deps = TestDependencies::new();
        let user = User::new("+1555", Utc::now());
        test_deps.store.seed_user(user.clone());
        test_deps.store.set_user_active(&user.user_id, false);

        let result = require_active_user(&user.user_id, &test_deps.server_deps()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
