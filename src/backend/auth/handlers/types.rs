/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the register,
 * login and logout handlers.
 *
 * Request fields are optional so that a missing field is reported with the
 * API's own message instead of a deserializer error.
 */

use serde::{Deserialize, Serialize};

use crate::shared::social::UserProfile;

/// Register request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    /// Plain text; hashed before storage and never logged
    pub password: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Auth response
///
/// Returned by register and login. The session token itself travels in the
/// `Set-Cookie` header, not in the body.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserProfile,
}

/// A response that carries only a message.
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Trim a required string field; blank counts as missing.
pub(crate) fn required(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
