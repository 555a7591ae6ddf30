/**
 * Application State Management
 *
 * This module defines the application state structure handed to every
 * handler through `State<AppState>`.
 *
 * # Architecture
 *
 * `AppState` is built once at startup and is read-only afterwards. It holds:
 * - The user, friend-graph and group stores
 * - The session token codec, password hasher and cookie settings
 * - Optional integrations (media store, chat service)
 *
 * Every field is `Copy` or shares its data through an `Arc`, so cloning
 * the state per request is cheap.
 *
 * # Example
 *
 * ```rust,no_run
 * use shuvomedia::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let users = state.stores.users.list_except(uuid::Uuid::nil()).await;
 * }
 * ```
 */

use std::sync::Arc;

use crate::backend::auth::cookies::SessionCookie;
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenCodec;
use crate::backend::integrations::{ChatService, MediaStore};
use crate::backend::server::config::SigningSecret;
use crate::backend::store::Stores;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// User records, the friend graph and chat groups
    pub stores: Stores,

    /// Signs and verifies session tokens
    pub tokens: Arc<TokenCodec>,

    /// bcrypt hasher with the configured cost
    pub hasher: PasswordHasher,

    /// Attributes of the `token` cookie
    pub session_cookie: SessionCookie,

    /// Avatar uploads. `None` when Cloudinary is not configured.
    pub media: Option<Arc<dyn MediaStore>>,

    /// Chat identity mirror. `None` when Stream is not configured.
    pub chat: Option<Arc<dyn ChatService>>,
}

impl AppState {
    /// State with the given stores and secret, default hashing cost,
    /// non-secure cookies and no integrations.
    pub fn new(stores: Stores, secret: &SigningSecret) -> Self {
        Self {
            stores,
            tokens: Arc::new(TokenCodec::new(secret)),
            hasher: PasswordHasher::default(),
            session_cookie: SessionCookie::new(false),
            media: None,
            chat: None,
        }
    }

    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn with_session_cookie(mut self, cookie: SessionCookie) -> Self {
        self.session_cookie = cookie;
        self
    }

    pub fn with_media(mut self, media: Arc<dyn MediaStore>) -> Self {
        self.media = Some(media);
        self
    }

    pub fn with_chat(mut self, chat: Arc<dyn ChatService>) -> Self {
        self.chat = Some(chat);
        self
    }
}
