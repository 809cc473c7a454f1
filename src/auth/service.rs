//! # Account Service
//!
//! Registration, login and token authentication on top of a `UserRepository`.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::crypto::PasswordPolicy;
use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtConfig, JwtManager, UserClaims};
use super::user::{User, UserRepository};
use crate::api::{CredentialsRequest, RegisterRequest, TokenResponse, UserProfile};
use crate::storage::StorageError;

/// Auth service combining the user store and token issuing
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    jwt_manager: JwtManager,
    password_policy: PasswordPolicy,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        jwt_config: JwtConfig,
        password_policy: PasswordPolicy,
    ) -> Self {
        Self {
            users,
            jwt_manager: JwtManager::new(jwt_config),
            password_policy,
        }
    }

    /// Register a new user
    ///
    /// Username and display name are trimmed; the username must be unique
    /// ignoring case.
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<UserProfile> {
        let username = request.username.trim();
        let display_name = request.display_name.trim();

        if username.is_empty() || display_name.is_empty() || request.password.is_empty() {
            return Err(AuthError::InvalidData);
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let user = User::new(
            username,
            display_name,
            &request.password,
            &self.password_policy,
        )?;

        self.users.create(&user).await.map_err(|e| match e {
            // lost a race with a concurrent registration
            StorageError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Storage(other),
        })?;

        info!(user_id = %user.user_id, username = %user.username, "Registered user");
        Ok(user.profile())
    }

    /// Authenticate a user and issue an access token
    pub async fn login(&self, request: CredentialsRequest) -> AuthResult<TokenResponse> {
        let username = request.username.trim();

        if username.is_empty() || request.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(&request.password)? {
            debug!(username = %username, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt_manager.generate_access_token(&user)?;
        info!(user_id = %user.user_id, "User logged in");

        Ok(TokenResponse {
            token,
            expires_in: self.jwt_manager.ttl_seconds(),
        })
    }

    /// Validate a bearer token
    ///
    /// Every failure collapses into `InvalidToken` so the response does not
    /// reveal why the token was refused.
    pub fn authenticate(&self, token: &str) -> AuthResult<UserClaims> {
        self.jwt_manager.validate_token(token).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            AuthError::InvalidToken
        })
    }

    /// Public profile of the authenticated user
    pub async fn account(&self, user_id: Uuid) -> AuthResult<UserProfile> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|user| user.profile())
            .ok_or(AuthError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn service() -> AccountService {
        AccountService::new(
            Arc::new(MemoryStore::new()),
            JwtConfig::default(),
            PasswordPolicy::default(),
        )
    }

    fn register_request(username: &str, password: &str, display_name: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
        }
    }

    fn credentials(username: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_trims_fields() {
        let service = service();
        let profile = service
            .register(register_request("  alice ", "pw", " Alice  "))
            .await
            .unwrap();

        assert_eq!(profile.username, "alice");
        assert_eq!(profile.display_name, "Alice");
    }

    #[tokio::test]
    async fn test_register_rejects_blank_fields() {
        let service = service();

        for request in [
            register_request("   ", "pw", "Alice"),
            register_request("alice", "", "Alice"),
            register_request("alice", "pw", " "),
        ] {
            let result = service.register(request).await;
            assert!(matches!(result, Err(AuthError::InvalidData)));
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_username_ignores_case() {
        let service = service();
        service
            .register(register_request("alice", "pw", "Alice"))
            .await
            .unwrap();

        let result = service
            .register(register_request("ALICE", "other", "Alice 2"))
            .await;
        assert!(matches!(result, Err(AuthError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_login_and_authenticate() {
        let service = service();
        let profile = service
            .register(register_request("alice", "pw", "Alice"))
            .await
            .unwrap();

        let token = service.login(credentials("Alice", "pw")).await.unwrap();
        assert_eq!(token.expires_in, 12 * 60 * 60);

        let claims = service.authenticate(&token.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), profile.user_id);

        let account = service.account(profile.user_id).await.unwrap();
        assert_eq!(account, profile);
    }

    #[tokio::test]
    async fn test_login_failures_are_generic() {
        let service = service();
        service
            .register(register_request("alice", "pw", "Alice"))
            .await
            .unwrap();

        for request in [
            credentials("alice", "wrong"),
            credentials("nobody", "pw"),
            credentials("", "pw"),
            credentials("alice", ""),
        ] {
            let result = service.login(request).await;
            assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        }
    }

    #[tokio::test]
    async fn test_authenticate_rejects_garbage() {
        let service = service();
        assert!(matches!(
            service.authenticate("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_account_for_unknown_user() {
        let service = service();
        let result = service.account(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }
}
