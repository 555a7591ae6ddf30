//! Recording stand-ins for the hosted media and chat services.

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use shuvomedia::backend::integrations::{ChatService, IntegrationError, MediaStore};

pub const UPLOADED_URL: &str = "https://cdn.example.com/avatar.png";

fn outage() -> IntegrationError {
    IntegrationError::Status {
        service: "chat",
        status: 500,
        body: "down".to_string(),
    }
}

/// Media store that records uploads and hands back `UPLOADED_URL`.
#[derive(Default)]
pub struct RecordingMedia {
    /// (folder, size, content type, file name)
    pub uploads: Mutex<Vec<(String, usize, String, String)>>,
}

#[async_trait]
impl MediaStore for RecordingMedia {
    async fn upload(
        &self,
        folder: &str,
        bytes: Bytes,
        content_type: &str,
        file_name: &str,
    ) -> Result<String, IntegrationError> {
        self.uploads.lock().unwrap().push((
            folder.to_string(),
            bytes.len(),
            content_type.to_string(),
            file_name.to_string(),
        ));
        Ok(UPLOADED_URL.to_string())
    }
}

/// Chat service that records identities and channel calls.
#[derive(Default)]
pub struct RecordingChat {
    pub identities: Mutex<Vec<(Uuid, String, String)>>,
    /// (channel id, name, members, creator)
    pub channels: Mutex<Vec<(Uuid, String, Vec<Uuid>, Uuid)>>,
    pub renames: Mutex<Vec<(Uuid, String)>>,
    pub fail: bool,
}

#[async_trait]
impl ChatService for RecordingChat {
    async fn upsert_identity(
        &self,
        user_id: Uuid,
        name: &str,
        image: &str,
    ) -> Result<(), IntegrationError> {
        if self.fail {
            return Err(outage());
        }
        self.identities
            .lock()
            .unwrap()
            .push((user_id, name.to_string(), image.to_string()));
        Ok(())
    }

    async fn create_channel(
        &self,
        channel_id: Uuid,
        name: &str,
        members: &[Uuid],
        created_by: Uuid,
    ) -> Result<(), IntegrationError> {
        if self.fail {
            return Err(outage());
        }
        self.channels.lock().unwrap().push((
            channel_id,
            name.to_string(),
            members.to_vec(),
            created_by,
        ));
        Ok(())
    }

    async fn update_channel(&self, channel_id: Uuid, name: &str) -> Result<(), IntegrationError> {
        if self.fail {
            return Err(outage());
        }
        self.renames
            .lock()
            .unwrap()
            .push((channel_id, name.to_string()));
        Ok(())
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, IntegrationError> {
        Ok(format!("chat-token-{}", user_id))
    }
}
