//! Tracking error types

use thiserror::Error;

use crate::storage::StorageError;

pub type TrackingResult<T> = Result<T, TrackingError>;

#[derive(Debug, Clone, Error)]
pub enum TrackingError {
    /// Date in a future year, negative level, or a year out of range
    #[error("Invalid data")]
    InvalidData,

    #[error("User not found")]
    UserNotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl TrackingError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            TrackingError::InvalidData => 403,
            TrackingError::UserNotFound => 404,
            TrackingError::Storage(_) => 500,
        }
    }
}
