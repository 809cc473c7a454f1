//! CLI-specific error types

use std::fmt;
use std::io;

use crate::client::ClientError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or environment error
    ConfigError,
    /// I/O error
    IoError,
    /// Server failed to start or stopped with an error
    BootFailed,
    /// The API refused or failed a request
    RequestFailed,
    /// No valid session
    NotLoggedIn,
    /// Bad command-line input
    InvalidInput,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "DRINKDAYS_CLI_CONFIG_ERROR",
            Self::IoError => "DRINKDAYS_CLI_IO_ERROR",
            Self::BootFailed => "DRINKDAYS_CLI_BOOT_FAILED",
            Self::RequestFailed => "DRINKDAYS_CLI_REQUEST_FAILED",
            Self::NotLoggedIn => "DRINKDAYS_CLI_NOT_LOGGED_IN",
            Self::InvalidInput => "DRINKDAYS_CLI_INVALID_INPUT",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::RequestFailed, msg)
    }

    pub fn not_logged_in() -> Self {
        Self::new(
            CliErrorCode::NotLoggedIn,
            "Not logged in. Run 'drinkdays login' first.",
        )
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        Self::boot_failed(e.to_string())
    }
}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::NotAuthenticated => Self::not_logged_in(),
            e if e.is_unauthorized() => Self::not_logged_in(),
            ClientError::Api { message, .. } => Self::request_failed(message),
            ClientError::PasswordMismatch => Self::invalid_input("Passwords do not match"),
            ClientError::Config(message) => Self::config_error(message),
            ClientError::Io(err) => Self::io_error(err.to_string()),
            ClientError::TokenStore(message) => Self::io_error(message),
            ClientError::Http(err) => Self::request_failed(err.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
