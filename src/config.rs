//! Application configuration
//!
//! Loaded from an optional JSON file, then overridden by environment
//! variables:
//!
//! - `APP_SECRET`: base64 token signing secret
//! - `DB_CONNECTION_STRING`: PostgreSQL URL; unset means in-memory storage
//! - `LISTEN_ADDRESS_PORT`: `host:port` to bind
//! - `RUST_LOG`: log filter

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::jwt::DEFAULT_SECRET;
use crate::auth::{JwtConfig, PasswordPolicy};
use crate::http_server::HttpServerConfig;

pub const VAR_APP_SECRET: &str = "APP_SECRET";
pub const VAR_DB_CONNECTION_STRING: &str = "DB_CONNECTION_STRING";
pub const VAR_LISTEN_ADDRESS_PORT: &str = "LISTEN_ADDRESS_PORT";
pub const VAR_RUST_LOG: &str = "RUST_LOG";

/// Longest accepted token lifetime: one year
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to parse {0}")]
    InvalidVar(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Whether `secret` is base64 encoded
    #[serde(default)]
    pub secret_base64: bool,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

fn default_secret() -> String {
    DEFAULT_SECRET.to_string()
}

fn default_token_ttl_hours() -> i64 {
    12
}

fn default_min_password_length() -> usize {
    1
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            secret_base64: false,
            token_ttl_hours: default_token_ttl_hours(),
            min_password_length: default_min_password_length(),
        }
    }
}

impl AuthConfig {
    fn secret_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        if self.secret_base64 {
            base64::engine::general_purpose::STANDARD
                .decode(self.secret.trim())
                .map_err(|_| ConfigError::InvalidVar(VAR_APP_SECRET))
        } else {
            Ok(self.secret.as_bytes().to_vec())
        }
    }

    pub fn jwt_config(&self) -> Result<JwtConfig, ConfigError> {
        Ok(JwtConfig {
            secret: self.secret_bytes()?,
            token_ttl: self.token_ttl()?,
            ..JwtConfig::default()
        })
    }

    fn token_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        if self.token_ttl_hours <= 0 || self.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(ConfigError::Invalid(format!(
                "auth.token_ttl_hours must be between 1 and {}",
                MAX_TOKEN_TTL_HOURS
            )));
        }

        chrono::Duration::try_hours(self.token_ttl_hours).ok_or_else(|| {
            ConfigError::Invalid("auth.token_ttl_hours is out of range".into())
        })
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            min_length: self.min_password_length,
        }
    }

    /// Still signing with the built-in development secret
    pub fn uses_default_secret(&self) -> bool {
        !self.secret_base64 && self.secret == DEFAULT_SECRET
    }
}

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    /// `tracing` filter directive, e.g. "info" or "drinkdays=debug"
    #[serde(default)]
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Load from `path` (defaults if the file does not exist), apply
    /// environment overrides and validate
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            AppConfig::default()
        };

        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides, reading variables through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup(VAR_APP_SECRET) {
            self.auth.secret = secret;
            self.auth.secret_base64 = true;
        }

        if let Some(url) = lookup(VAR_DB_CONNECTION_STRING) {
            self.database.url = Some(url);
        }

        if let Some(addr) = lookup(VAR_LISTEN_ADDRESS_PORT) {
            let addr: SocketAddr = addr
                .parse()
                .map_err(|_| ConfigError::InvalidVar(VAR_LISTEN_ADDRESS_PORT))?;
            self.server.set_listen_addr(addr);
        }

        if let Some(filter) = lookup(VAR_RUST_LOG) {
            self.log_level = Some(filter);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.secret_bytes()?.is_empty() {
            return Err(ConfigError::Invalid("auth.secret must not be empty".into()));
        }

        self.auth.token_ttl()?;

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be > 0".into(),
            ));
        }

        Ok(())
    }
}
