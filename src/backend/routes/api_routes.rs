/**
 * User API Routes
 *
 * This module defines the routes mounted under `/api/user`.
 *
 * # Routes
 *
 * ## Public
 * - `POST /register` - Create an account and set the session cookie
 * - `POST /login` - Verify credentials and set the session cookie
 * - `POST /logout` - Expire the session cookie
 *
 * ## Authenticated
 * - `GET /getMe` - Own profile
 * - `GET /profile/{id}` - Any user's profile
 * - `PATCH /updateProfile` - Partial profile update, optional avatar
 * - `GET /recommendations` - Candidate friends
 * - `GET /friends` - Current friends
 * - `POST /friend-request/{id}` - Send a request to user `id`
 * - `DELETE /cancel-friend-request/{id}` - Cancel request `id`
 * - `POST /accept-friend-request/{id}` - Accept request `id`
 * - `DELETE /reject-friend-request/{id}` - Reject request `id`
 * - `GET /friend-requests` - Incoming pending requests
 * - `GET /getOutgoingFriendRequests` - Outgoing pending requests
 */

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use crate::backend::auth::handlers::{login, logout, register};
use crate::backend::friends::{
    accept_friend_request, cancel_friend_request, get_friend_requests, get_friends,
    get_outgoing_friend_requests, get_recommendations, reject_friend_request,
    send_friend_request,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::profile::{get_me, get_profile, update_profile};
use crate::backend::server::state::AppState;

/// Configure the `/api/user` routes
///
/// Authenticated routes sit behind `auth_middleware` via `route_layer`, so
/// an unknown path still falls through to the router's 404 instead of
/// answering 401.
pub fn configure_user_routes(app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/getMe", get(get_me))
        .route("/profile/{id}", get(get_profile))
        .route("/updateProfile", patch(update_profile))
        .route("/recommendations", get(get_recommendations))
        .route("/friends", get(get_friends))
        .route("/friend-request/{id}", post(send_friend_request))
        .route("/cancel-friend-request/{id}", delete(cancel_friend_request))
        .route("/accept-friend-request/{id}", post(accept_friend_request))
        .route("/reject-friend-request/{id}", delete(reject_friend_request))
        .route("/friend-requests", get(get_friend_requests))
        .route("/getOutgoingFriendRequests", get(get_outgoing_friend_requests))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .merge(protected)
}
