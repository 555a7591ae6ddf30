/**
 * Register Handler
 *
 * This module implements the user registration handler for
 * POST /api/user/register.
 *
 * # Registration Process
 *
 * 1. Check that full name, email and password are present
 * 2. Validate password length and email format
 * 3. Reject an email that is already registered
 * 4. Mirror the new identity into the chat service
 * 5. Hash the password and store the user
 * 6. Issue a session token in the `token` cookie
 * 7. Return 201 with the new profile
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::backend::auth::handlers::types::{required, AuthResponse, RegisterRequest};
use crate::backend::auth::users::User;
use crate::backend::chat::sync_identity;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::social::profile::DEFAULT_PROFILE_PICTURE;
use crate::shared::validation::{normalize_email, validate_email, validate_password};
use crate::shared::SharedError;

const USER_EXISTS: &str = "User already exists";

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing field, short password, malformed email, or
///   the email is already registered
/// * `500 Internal Server Error` - Hashing, storage or chat sync failed
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BackendError> {
    let Json(request) = payload?;

    let (Some(full_name), Some(email), Some(password)) = (
        required(request.full_name),
        required(request.email),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(SharedError::missing("All fields are required").into());
    };

    validate_password(&password)?;
    let email = normalize_email(&email);
    validate_email(&email)?;

    tracing::info!("Registration request for {}", email);

    if state.stores.users.find_by_email(&email).await?.is_some() {
        tracing::warn!("Registration for existing email {}", email);
        return Err(BackendError::conflict(USER_EXISTS));
    }

    let user_id = Uuid::new_v4();
    sync_identity(
        state.chat.as_deref(),
        user_id,
        &full_name,
        DEFAULT_PROFILE_PICTURE,
    )
    .await?;

    let password_hash = state.hasher.hash(&password).await?;
    let user = state
        .stores
        .users
        .create(User::new(user_id, full_name, email, password_hash))
        .await
        .map_err(|e| match e {
            StoreError::Duplicate { .. } => BackendError::conflict(USER_EXISTS),
            other => other.into(),
        })?;

    let token = state.tokens.issue(user.id)?;
    let cookie = state.session_cookie.issue(&token)?;

    tracing::info!("User registered: {} ({})", user.id, user.email);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: user.to_profile(),
        }),
    ))
}
