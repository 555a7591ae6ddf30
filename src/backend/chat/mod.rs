//! Chat Module
//!
//! Touch points with the hosted chat service:
//!
//! - **`sync_identity`** - Mirror a user's name and avatar into the chat
//!   service after register, login and profile updates
//! - **`token`** - `GET /api/chats/token`, the user token the frontend
//!   connects with
//! - **`groups`** - Group chats under `/api/chats/groups`, each backed by
//!   one messaging channel
//!
//! When no chat service is configured, identity sync and channel calls are
//! skipped and the token endpoint answers 503.

use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::integrations::ChatService;

pub mod groups;
pub mod token;

pub use groups::{create_group, get_groups, update_group};
pub use token::get_chat_token;

/// Upsert a chat identity, if a chat service is configured.
pub async fn sync_identity(
    chat: Option<&dyn ChatService>,
    user_id: uuid::Uuid,
    name: &str,
    image: &str,
) -> Result<(), BackendError> {
    let Some(chat) = chat else {
        tracing::debug!("No chat service configured; skipping identity sync for {}", user_id);
        return Ok(());
    };

    chat.upsert_identity(user_id, name, image).await.map_err(|e| {
        tracing::error!("Failed to upsert chat identity for {}: {}", user_id, e);
        BackendError::from(e)
    })
}

/// Same as `sync_identity`, for a stored user record.
pub async fn sync_user(chat: Option<&dyn ChatService>, user: &User) -> Result<(), BackendError> {
    sync_identity(chat, user.id, &user.full_name, &user.profile_picture).await
}
