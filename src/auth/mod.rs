//! # Auth Module
//!
//! Password hashing, bearer tokens and the account service behind
//! `/register`, `/login` and `/account`.

pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod service;
pub mod user;

pub use crypto::PasswordPolicy;
pub use errors::{AuthError, AuthResult};
pub use jwt::{JwtConfig, JwtManager, UserClaims};
pub use service::AccountService;
pub use user::{User, UserRepository};
