//! Logout handler for POST /api/user/logout.
//!
//! Sessions are stateless, so logging out only expires the cookie. It needs
//! no session and always succeeds.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json},
};

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::server::state::AppState;

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, state.session_cookie.clear())],
        Json(MessageResponse::new("User logged out successfully")),
    )
}
