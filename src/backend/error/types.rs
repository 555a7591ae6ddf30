/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the HTTP API. Every handler and
 * every engine operation returns `BackendError`, and each variant maps to
 * exactly one HTTP status code.
 *
 * # Error Categories
 *
 * - `InvalidInput` (400) - Malformed or missing request data
 * - `Unauthenticated` (401) - No session, bad session, or bad credentials
 * - `Forbidden` (403) - Authenticated, but not allowed to act on the resource
 * - `NotFound` (404) - The addressed record does not exist (or is resolved)
 * - `Conflict` (400) - The request contradicts existing state
 * - `Unavailable` (503) - An optional integration is not configured
 * - `Internal` (500) - A collaborator failed; details are logged, not returned
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::sessions::TokenError;
use crate::backend::integrations::IntegrationError;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Message returned to clients in place of internal failure details.
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("{message}")]
    Unauthenticated { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Unavailable { message: String },

    #[error("Internal error: {detail}")]
    Internal { detail: String },

    #[error(transparent)]
    Shared(#[from] SharedError),
}

impl BackendError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated { message: message.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden { message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict { message: message.into() }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable { message: message.into() }
    }

    /// Wrap a collaborator failure. `detail` is logged but never sent.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal { detail: detail.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Shared(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The message safe to show the client.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput { message }
            | Self::Unauthenticated { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::Unavailable { message } => message.clone(),
            Self::Internal { .. } => INTERNAL_MESSAGE.to_string(),
            Self::Shared(err) => err.message().to_string(),
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { entity } => {
                Self::conflict(format!("{} already exists", entity))
            }
            StoreError::Backend(detail) => Self::internal(format!("store failure: {}", detail)),
        }
    }
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(detail) => Self::internal(format!("token signing failed: {}", detail)),
            TokenError::Expired | TokenError::Invalid(_) | TokenError::Subject => {
                Self::unauthenticated("Unauthorized: Invalid token")
            }
        }
    }
}

impl From<IntegrationError> for BackendError {
    fn from(err: IntegrationError) -> Self {
        Self::internal(format!("integration failure: {}", err))
    }
}
