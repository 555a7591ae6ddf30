//! Friend HTTP Handlers
//!
//! Thin wrappers over `engine`: parse the path id, call the engine with the
//! authenticated user, and wrap the result in the response envelope.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::engine;
use crate::backend::auth::handlers::MessageResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::profile::handlers::parse_id;
use crate::backend::server::state::AppState;
use crate::shared::social::{
    AcceptFriendRequestResponse, ListFriendRequestsResponse, ListFriendsResponse,
    ListOutgoingRequestsResponse, RecommendationsResponse, RejectFriendRequestResponse,
    SendFriendRequestResponse,
};

/// POST /friend-request/{id} - `id` is the recipient's user id
pub async fn send_friend_request(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<SendFriendRequestResponse>), BackendError> {
    let recipient_id = parse_id(&id, "user")?;
    let friend_request = engine::send_request(&state.stores, &user, recipient_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(SendFriendRequestResponse {
            message: "Friend request sent successfully".to_string(),
            friend_request,
        }),
    ))
}

/// DELETE /cancel-friend-request/{id}
pub async fn cancel_friend_request(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, BackendError> {
    let request_id = parse_id(&id, "request")?;
    engine::cancel_request(&state.stores, &user, request_id).await?;
    Ok(Json(MessageResponse::new("Friend request cancelled successfully")))
}

/// POST /accept-friend-request/{id}
pub async fn accept_friend_request(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<AcceptFriendRequestResponse>, BackendError> {
    let request_id = parse_id(&id, "request")?;
    let friend = engine::accept_request(&state.stores, &user, request_id).await?;
    Ok(Json(AcceptFriendRequestResponse {
        message: "Friend request accepted successfully".to_string(),
        friend,
    }))
}

/// DELETE /reject-friend-request/{id}
pub async fn reject_friend_request(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<RejectFriendRequestResponse>, BackendError> {
    let request_id = parse_id(&id, "request")?;
    let sender = engine::reject_request(&state.stores, &user, request_id).await?;
    Ok(Json(RejectFriendRequestResponse {
        message: "Friend request rejected successfully".to_string(),
        sender,
    }))
}

pub async fn get_friend_requests(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ListFriendRequestsResponse>, BackendError> {
    let friend_requests = engine::incoming_pending(&state.stores, &user).await?;
    let message = if friend_requests.is_empty() {
        "No friend requests found"
    } else {
        "Friend requests retrieved successfully"
    };
    Ok(Json(ListFriendRequestsResponse {
        message: message.to_string(),
        friend_requests,
    }))
}

pub async fn get_outgoing_friend_requests(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ListOutgoingRequestsResponse>, BackendError> {
    let outgoing_requests = engine::outgoing_pending(&state.stores, &user).await?;
    Ok(Json(ListOutgoingRequestsResponse {
        message: "Outgoing friend requests retrieved successfully".to_string(),
        outgoing_requests,
    }))
}

pub async fn get_friends(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ListFriendsResponse>, BackendError> {
    let friends = engine::friends_of(&state.stores, &user).await?;
    Ok(Json(ListFriendsResponse {
        message: "Friends retrieved successfully".to_string(),
        friends,
    }))
}

pub async fn get_recommendations(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<RecommendationsResponse>, BackendError> {
    let users = engine::recommendations(&state.stores, &user).await?;
    Ok(Json(RecommendationsResponse {
        message: "Recommended users retrieved successfully".to_string(),
        users,
    }))
}
