/**
 * Authentication Middleware
 *
 * This module protects routes that require a signed-in user. It reads the
 * session token from the `token` cookie (or an `Authorization: Bearer`
 * header), verifies it, loads the current user record and attaches it to
 * the request extensions.
 *
 * The gate never writes anything. A token naming a user that no longer
 * exists is treated like a bad token.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::backend::auth::cookies::token_from_headers;
use crate::backend::auth::sessions::TokenCodec;
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::UserStore;

/// The signed-in user, as loaded by the gate for this request.
#[derive(Clone, Debug)]
pub struct Identity(pub User);

/// Resolve a session token to the current user record.
pub async fn authenticate(
    tokens: &TokenCodec,
    users: &dyn UserStore,
    token: Option<&str>,
) -> Result<User, BackendError> {
    let token = token.ok_or_else(|| {
        tracing::debug!("Request without session token");
        BackendError::unauthenticated("Unauthorized: No token provided")
    })?;

    let user_id = tokens.verify(token).map_err(|e| {
        tracing::warn!("Rejected session token: {}", e);
        BackendError::from(e)
    })?;

    users.find_by_id(user_id).await?.ok_or_else(|| {
        tracing::warn!("Session token names unknown user {}", user_id);
        BackendError::unauthenticated("Unauthorized: User not found")
    })
}

/// Authentication middleware
///
/// Returns 401 with the standard error body when the request carries no
/// valid session.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = token_from_headers(request.headers());
    let user = authenticate(
        &app_state.tokens,
        app_state.stores.users.as_ref(),
        token.as_deref(),
    )
    .await?;

    request.extensions_mut().insert(Identity(user));
    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid behind `auth_middleware`; without it the extractor rejects
/// the request as unauthenticated.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .map(|identity| AuthUser(identity.0.clone()))
            .ok_or_else(|| {
                tracing::warn!("Identity not found in request extensions");
                BackendError::unauthenticated("Unauthorized: No token provided")
            })
    }
}
