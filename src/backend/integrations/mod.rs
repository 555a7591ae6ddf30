//! External Integrations
//!
//! Clients for the two third-party services the API talks to:
//!
//! - **`media`** - Cloudinary signed uploads for profile and group pictures
//! - **`chat`** - Stream Chat user upserts, group channels and user tokens
//!
//! Handlers only see the `MediaStore` and `ChatService` traits, held as
//! optional `Arc<dyn _>` in `AppState`. Either may be absent when its
//! credentials are not configured.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use uuid::Uuid;

pub mod chat;
pub mod media;

pub use chat::StreamChatClient;
pub use media::CloudinaryMediaStore;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("request to {service} failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} responded with {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to sign token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("malformed response from {service}: {detail}")]
    Malformed {
        service: &'static str,
        detail: String,
    },
}

impl IntegrationError {
    pub(crate) fn transport(service: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Transport { service, source }
    }
}

/// Turn a non-2xx response into `Status`, keeping the body for the log.
pub(crate) async fn check_status(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, IntegrationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| status.to_string());
    Err(IntegrationError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}

/// Media folder for profile pictures.
pub const PROFILE_FOLDER: &str = "shuvochat_profiles";

/// Media folder for group pictures.
pub const GROUP_FOLDER: &str = "shuvomedia_groups";

/// Hosted image storage.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store an image under `folder` and return its public URL.
    async fn upload(
        &self,
        folder: &str,
        bytes: Bytes,
        content_type: &str,
        file_name: &str,
    ) -> Result<String, IntegrationError>;
}

/// Hosted chat service that mirrors user identities.
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn upsert_identity(
        &self,
        user_id: Uuid,
        name: &str,
        image: &str,
    ) -> Result<(), IntegrationError>;

    /// Create the messaging channel of a group. `members` must already
    /// include `created_by`.
    async fn create_channel(
        &self,
        channel_id: Uuid,
        name: &str,
        members: &[Uuid],
        created_by: Uuid,
    ) -> Result<(), IntegrationError>;

    /// Rename a group's messaging channel.
    async fn update_channel(&self, channel_id: Uuid, name: &str) -> Result<(), IntegrationError>;

    /// Token the frontend uses to connect to the chat service as `user_id`.
    fn create_token(&self, user_id: Uuid) -> Result<String, IntegrationError>;
}
