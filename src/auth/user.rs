//! # User Accounts
//!
//! User model and the repository abstraction used by the account service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, verify_password, PasswordPolicy};
use super::errors::AuthResult;
use crate::api::UserProfile;
use crate::storage::StorageResult;

/// User model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,

    /// Login name, unique case-insensitively
    pub username: String,

    /// Name shown on leaderboards
    pub display_name: String,

    /// Argon2id password hash (never plaintext)
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Create a new user, hashing the password after checking it against `policy`
    pub fn new(
        username: &str,
        display_name: &str,
        password: &str,
        policy: &PasswordPolicy,
    ) -> AuthResult<Self> {
        policy.validate(password)?;
        let password_hash = hash_password(password)?;

        Ok(Self {
            user_id: Uuid::new_v4(),
            username: username.to_string(),
            display_name: display_name.to_string(),
            password_hash,
        })
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// User repository trait
///
/// Abstracts storage operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their ID
    async fn find_by_id(&self, user_id: Uuid) -> StorageResult<Option<User>>;

    /// Find a user by username, ignoring case
    async fn find_by_username(&self, username: &str) -> StorageResult<Option<User>>;

    /// Create a new user; a clashing username is a `StorageError::Conflict`
    async fn create(&self, user: &User) -> StorageResult<()>;
}
