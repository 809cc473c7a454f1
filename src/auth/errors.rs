//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Account Errors
    // ==================

    /// Unknown user or wrong password (generic - don't leak which one)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username already taken (case-insensitive)
    #[error("User already exists")]
    UserAlreadyExists,

    /// Empty or otherwise unusable registration data
    #[error("Invalid data")]
    InvalidData,

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// Account referenced by a valid token no longer exists
    #[error("User not found")]
    UserNotFound,

    // ==================
    // Token Errors
    // ==================

    /// Missing, malformed, expired or forged bearer token
    #[error("Invalid token")]
    InvalidToken,

    /// JWT token has expired
    #[error("Token expired")]
    TokenExpired,

    /// JWT signature is invalid
    #[error("Invalid token signature")]
    InvalidSignature,

    /// JWT token is malformed
    #[error("Malformed token")]
    MalformedToken,

    // ==================
    // Internal Errors
    // ==================

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::WeakPassword(_) => 400,

            // 401 Unauthorized
            AuthError::InvalidToken => 401,
            AuthError::TokenExpired => 401,
            AuthError::InvalidSignature => 401,
            AuthError::MalformedToken => 401,

            // 403 Forbidden, kept from the web client contract
            AuthError::InvalidCredentials => 403,
            AuthError::UserAlreadyExists => 403,
            AuthError::InvalidData => 403,

            // 404 Not Found
            AuthError::UserNotFound => 404,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::TokenGenerationFailed => 500,
            AuthError::Storage(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 403);
        assert_eq!(AuthError::UserAlreadyExists.status_code(), 403);
        assert_eq!(AuthError::InvalidToken.status_code(), 401);
        assert_eq!(AuthError::UserNotFound.status_code(), 404);
        assert_eq!(AuthError::HashingFailed.status_code(), 500);
        assert_eq!(AuthError::TokenGenerationFailed.status_code(), 500);
    }

    #[test]
    fn test_error_messages_do_not_leak_info() {
        let err = AuthError::InvalidCredentials;
        assert!(!err.to_string().contains("password"));
        assert!(!err.to_string().contains("username"));
    }
}
