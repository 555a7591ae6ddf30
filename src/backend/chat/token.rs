/**
 * Chat Token Handler
 *
 * `GET /api/chats/token` returns a chat-service user token for the signed-in
 * user. The token is signed with the chat service's secret, so the frontend
 * can connect to the chat service directly.
 */

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatTokenResponse {
    pub token: String,
}

pub async fn get_chat_token(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ChatTokenResponse>, BackendError> {
    let chat = state.chat.as_ref().ok_or_else(|| {
        tracing::warn!("Chat token requested but no chat service is configured");
        BackendError::unavailable("Chat service is not configured")
    })?;

    let token = chat.create_token(user.id).map_err(|e| {
        tracing::error!("Failed to create chat token for {}: {}", user.id, e);
        BackendError::from(e)
    })?;

    Ok(Json(ChatTokenResponse { token }))
}
