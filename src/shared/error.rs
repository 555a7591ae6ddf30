//! Shared Error Types
//!
//! This module defines error types for failures that can be detected without
//! touching the server: malformed input that a client could have caught
//! before sending the request.
//!
//! # Error Categories
//!
//! - `ValidationError` - A single field failed validation
//! - `MissingFields` - One or more required fields were absent or blank
//!
//! # Usage
//!
//! ```rust
//! use shuvomedia::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Invalid email format");
//! assert_eq!(error.message(), "Invalid email format");
//! ```
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        field: String,
        message: String,
    },

    #[error("Missing fields: {message}")]
    MissingFields {
        message: String,
    },
}

impl SharedError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing(message: impl Into<String>) -> Self {
        Self::MissingFields {
            message: message.into(),
        }
    }

    /// The client-facing message, without the field prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
            Self::MissingFields { message } => message,
        }
    }
}
