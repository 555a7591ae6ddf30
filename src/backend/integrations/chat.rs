//! Stream Chat client
//!
//! Groups map onto `messaging` channels whose id is the group id. Channel
//! renames use a partial update, so members and creator are left as they
//! were.
//!
//! Server-side calls are authenticated with a JWT carrying `{"server": true}`
//! signed with the API secret. User tokens carry `{"user_id": ...}` and are
//! handed to the frontend, which connects to Stream directly.

use std::collections::HashMap;

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::Client;
use serde::Serialize;
use uuid::Uuid;

use super::{check_status, ChatService, IntegrationError};
use crate::backend::server::config::StreamConfig;

const SERVICE: &str = "stream";
const DEFAULT_BASE_URL: &str = "https://chat.stream-io-api.com";
const CHANNEL_TYPE: &str = "messaging";

#[derive(Serialize)]
struct ServerClaims {
    server: bool,
}

#[derive(Serialize)]
struct UserClaims<'a> {
    user_id: &'a str,
}

#[derive(Serialize)]
struct StreamUser<'a> {
    id: &'a str,
    name: &'a str,
    image: &'a str,
}

#[derive(Serialize)]
struct UpsertUsers<'a> {
    users: HashMap<&'a str, StreamUser<'a>>,
}

#[derive(Serialize)]
struct ChannelData<'a> {
    name: &'a str,
    members: Vec<String>,
    created_by_id: String,
}

#[derive(Serialize)]
struct CreateChannel<'a> {
    data: ChannelData<'a>,
}

#[derive(Serialize)]
struct ChannelName<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct PartialChannelUpdate<'a> {
    set: ChannelName<'a>,
}

pub struct StreamChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    signing_key: EncodingKey,
}

impl StreamChatClient {
    pub fn new(config: &StreamConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: config.api_key.clone(),
            signing_key: EncodingKey::from_secret(config.api_secret.expose().as_bytes()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn channel_url(&self, channel_id: Uuid) -> String {
        format!("{}/channels/{}/{}", self.base_url, CHANNEL_TYPE, channel_id)
    }

    async fn send_json<T: Serialize + Sync>(
        &self,
        request: reqwest::RequestBuilder,
        body: &T,
    ) -> Result<(), IntegrationError> {
        let response = request
            .query(&[("api_key", self.api_key.as_str())])
            .header("Authorization", self.server_token()?)
            .header("stream-auth-type", "jwt")
            .json(body)
            .send()
            .await
            .map_err(IntegrationError::transport(SERVICE))?;
        check_status(SERVICE, response).await?;
        Ok(())
    }

    fn server_token(&self) -> Result<String, IntegrationError> {
        Ok(encode(
            &Header::default(),
            &ServerClaims { server: true },
            &self.signing_key,
        )?)
    }
}

#[async_trait]
impl ChatService for StreamChatClient {
    async fn upsert_identity(
        &self,
        user_id: Uuid,
        name: &str,
        image: &str,
    ) -> Result<(), IntegrationError> {
        let id = user_id.to_string();
        let body = UpsertUsers {
            users: HashMap::from([(id.as_str(), StreamUser { id: &id, name, image })]),
        };

        self.send_json(self.client.post(format!("{}/users", self.base_url)), &body)
            .await?;

        tracing::debug!("Upserted chat identity for user {}", user_id);
        Ok(())
    }

    async fn create_channel(
        &self,
        channel_id: Uuid,
        name: &str,
        members: &[Uuid],
        created_by: Uuid,
    ) -> Result<(), IntegrationError> {
        let body = CreateChannel {
            data: ChannelData {
                name,
                members: members.iter().map(Uuid::to_string).collect(),
                created_by_id: created_by.to_string(),
            },
        };
        let url = format!("{}/query", self.channel_url(channel_id));
        self.send_json(self.client.post(url), &body).await?;

        tracing::debug!("Created chat channel {} with {} members", channel_id, members.len());
        Ok(())
    }

    async fn update_channel(&self, channel_id: Uuid, name: &str) -> Result<(), IntegrationError> {
        let body = PartialChannelUpdate {
            set: ChannelName { name },
        };
        self.send_json(self.client.patch(self.channel_url(channel_id)), &body)
            .await?;

        tracing::debug!("Renamed chat channel {}", channel_id);
        Ok(())
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, IntegrationError> {
        let id = user_id.to_string();
        Ok(encode(
            &Header::default(),
            &UserClaims { user_id: &id },
            &self.signing_key,
        )?)
    }
}
