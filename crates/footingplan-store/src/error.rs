//! Error types for the configuration store crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while reading or mutating stored configurations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record with this id.
    #[error("Configuration not found: {0}")]
    NotFound(String),

    /// A record with this id is already stored.
    #[error("Configuration already exists: {0}")]
    AlreadyExists(String),

    /// The record cannot be stored as given.
    #[error("Invalid configuration record: {0}")]
    InvalidRecord(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// True when the error is about the record itself rather than storage.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::AlreadyExists(_) | Self::InvalidRecord(_)
        )
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
