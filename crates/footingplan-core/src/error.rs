//! Error handling for FootingPlan
//!
//! Rendering itself never fails on bad numbers: invalid input is sanitized and
//! reported as a warning string. The types here cover what does surface to a
//! caller:
//! - Input errors (records with the wrong shape)
//! - JSON syntax errors
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Input error type
///
/// Raised when a parameter record cannot be read, as opposed to read and
/// sanitized.
#[derive(Error, Debug, Clone)]
pub enum InputError {
    /// Record could not be parsed
    #[error("Malformed configuration record: {reason}")]
    Malformed {
        /// The reason the record was rejected.
        reason: String,
    },

    /// A field has the wrong type or shape
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// The offending field name.
        field: String,
        /// The reason the field is invalid.
        reason: String,
    },
}

/// Main error type for FootingPlan
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),

    /// Text is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this is an input error
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Input(_))
    }

    /// Check if this is a JSON syntax error
    pub fn is_json_error(&self) -> bool {
        matches!(self, Error::Json(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
