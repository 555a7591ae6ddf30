/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /api/user/login.
 *
 * # Security
 *
 * - Passwords are verified with bcrypt on the blocking pool
 * - Unknown email and wrong password produce the same 401 after the same
 *   bcrypt work, so neither the body nor the timing reveals which accounts
 *   exist
 * - Passwords are never logged or returned
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Json},
};

use crate::backend::auth::handlers::types::{required, AuthResponse, LoginRequest};
use crate::backend::chat::sync_user;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::validation::{normalize_email, validate_email};
use crate::shared::SharedError;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing email or password, or malformed email
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `500 Internal Server Error` - Store, hashing or chat sync failure
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BackendError> {
    let Json(request) = payload?;

    let (Some(email), Some(password)) = (
        required(request.email),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(SharedError::missing("Email and password are required").into());
    };

    let email = normalize_email(&email);
    validate_email(&email)?;

    let Some(user) = state.stores.users.find_by_email(&email).await? else {
        state.hasher.verify_missing(&password).await?;
        tracing::warn!("Login for unknown email {}", email);
        return Err(BackendError::unauthenticated(INVALID_CREDENTIALS));
    };

    if !state.hasher.verify(&password, &user.password_hash).await? {
        tracing::warn!("Wrong password for user {}", user.id);
        return Err(BackendError::unauthenticated(INVALID_CREDENTIALS));
    }

    sync_user(state.chat.as_deref(), &user).await?;

    let token = state.tokens.issue(user.id)?;
    let cookie = state.session_cookie.issue(&token)?;

    tracing::info!("User logged in: {} ({})", user.id, user.email);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "User logged in successfully".to_string(),
            user: user.to_profile(),
        }),
    ))
}
