/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layout
 *
 * 1. `/api/user` - Account, profile and friend routes
 * 2. `/api/chats` - Chat-service token
 * 3. Fallback - JSON 404 for everything else
 *
 * Request bodies are capped slightly above the avatar limit so the
 * multipart extractor can report an oversized image itself.
 */

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::profile::MAX_AVATAR_BYTES;
use crate::backend::routes::api_routes::configure_user_routes;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;

/// Room for multipart framing and text fields around the avatar.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

async fn route_not_found() -> BackendError {
    BackendError::not_found("Route not found")
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    Router::new()
        .nest("/api/user", configure_user_routes(app_state.clone()))
        .nest("/api/chats", configure_chat_routes(app_state.clone()))
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES + FORM_OVERHEAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// CORS for a browser frontend on `origin` that sends the session cookie.
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
