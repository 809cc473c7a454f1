//! # JWT Token Management
//!
//! Bearer tokens handed out by `/login` and checked on every protected route.
//! Validation is stateless: no storage lookup is needed to trust the claims.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use super::user::User;

/// JWT claims for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Subject (user ID)
    pub sub: String,

    pub username: String,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,

    pub aud: String,
    pub iss: String,
}

impl UserClaims {
    /// User ID carried in `sub`
    pub fn user_id(&self) -> AuthResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::MalformedToken)
    }
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret (raw bytes)
    pub secret: Vec<u8>,

    /// Access token lifetime
    pub token_ttl: Duration,

    pub issuer: String,
    pub audience: String,
}

pub const DEFAULT_SECRET: &str = "CHANGE_THIS_SECRET_IN_PRODUCTION";

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.as_bytes().to_vec(),
            token_ttl: Duration::hours(12),
            issuer: "drinkdays".to_string(),
            audience: "drinkdays".to_string(),
        }
    }
}

/// JWT manager for token generation and validation
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(&config.secret);
        let decoding_key = DecodingKey::from_secret(&config.secret);

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Token lifetime in seconds, as reported in `expiresIn`
    pub fn ttl_seconds(&self) -> i64 {
        self.config.token_ttl.num_seconds()
    }

    /// Generate an access token for a user
    pub fn generate_access_token(&self, user: &User) -> AuthResult<String> {
        let now = Utc::now();
        let exp = now + self.config.token_ttl;

        let claims = UserClaims {
            sub: user.user_id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            aud: self.config.audience.clone(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Validate an access token and extract claims
    pub fn validate_token(&self, token: &str) -> AuthResult<UserClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);

        let token_data =
            decode::<UserClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AuthError::InvalidSignature
                    }
                    _ => AuthError::MalformedToken,
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::crypto::PasswordPolicy;

    fn create_test_manager() -> JwtManager {
        JwtManager::new(JwtConfig {
            secret: b"test_secret_key_for_testing_only".to_vec(),
            token_ttl: Duration::hours(12),
            issuer: "test".to_string(),
            audience: "test".to_string(),
        })
    }

    fn create_test_user() -> User {
        User::new("alice", "Alice", "password123", &PasswordPolicy::default()).unwrap()
    }

    #[test]
    fn test_token_generation() {
        let manager = create_test_manager();
        let token = manager.generate_access_token(&create_test_user()).unwrap();

        // header.payload.signature
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(manager.ttl_seconds(), 12 * 60 * 60);
    }

    #[test]
    fn test_token_validation() {
        let manager = create_test_manager();
        let user = create_test_user();

        let token = manager.generate_access_token(&user).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.user_id);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let manager = create_test_manager();

        let result = manager.validate_token("invalid.token.here");
        assert!(matches!(
            result,
            Err(AuthError::MalformedToken) | Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager1 = JwtManager::new(JwtConfig {
            secret: b"secret_one".to_vec(),
            ..JwtConfig::default()
        });
        let manager2 = JwtManager::new(JwtConfig {
            secret: b"secret_two".to_vec(),
            ..JwtConfig::default()
        });

        let token = manager1.generate_access_token(&create_test_user()).unwrap();
        let result = manager2.validate_token(&token);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let secret = b"test_secret";
        let now = Utc::now();
        let claims = UserClaims {
            sub: Uuid::new_v4().to_string(),
            username: "alice".to_string(),
            iat: (now - Duration::hours(14)).timestamp(),
            exp: (now - Duration::hours(2)).timestamp(),
            aud: "test".to_string(),
            iss: "test".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap();

        let manager = JwtManager::new(JwtConfig {
            secret: secret.to_vec(),
            token_ttl: Duration::hours(12),
            issuer: "test".to_string(),
            audience: "test".to_string(),
        });

        let result = manager.validate_token(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_token_does_not_contain_password_hash() {
        let manager = create_test_manager();
        let user = create_test_user();

        let token = manager.generate_access_token(&user).unwrap();
        assert!(!token.contains(&user.password_hash));
    }
}
