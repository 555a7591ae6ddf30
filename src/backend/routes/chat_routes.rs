//! Chat API Routes
//!
//! Routes mounted under `/api/chats`:
//!
//! - `GET /token` - Chat-service user token for the signed-in user
//! - `GET /groups` - Groups the signed-in user belongs to
//! - `POST /groups` - Create a group and its channel
//! - `PATCH /groups/{id}` - Rename a group or change its image (creator only)

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};

use crate::backend::chat::{create_group, get_chat_token, get_groups, update_group};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

pub fn configure_chat_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/token", get(get_chat_token))
        .route("/groups", get(get_groups).post(create_group))
        .route("/groups/{id}", patch(update_group))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware))
}
