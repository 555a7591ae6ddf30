/**
 * Cloudinary Media Store
 *
 * Uploads profile and group pictures with Cloudinary's signed upload API. The request
 * is a multipart form carrying the file, the API key, a timestamp, the
 * target folder and a signature: the SHA-1 hex digest of the sorted signed
 * parameters followed by the API secret.
 */

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use sha1::{Digest, Sha1};

use super::{check_status, IntegrationError, MediaStore};
use crate::backend::server::config::{CloudinaryConfig, SigningSecret};

const SERVICE: &str = "cloudinary";
const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

pub struct CloudinaryMediaStore {
    client: Client,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: SigningSecret,
}

impl CloudinaryMediaStore {
    pub fn new(config: &CloudinaryConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        }
    }

    /// Point the client at another host (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn upload_url(&self) -> String {
        format!("{}/v1_1/{}/image/upload", self.base_url, self.cloud_name)
    }
}

/// Signature over the signed parameters, in alphabetical order.
pub(crate) fn sign_params(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted: Vec<_> = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(joined.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn upload(
        &self,
        folder: &str,
        bytes: Bytes,
        content_type: &str,
        file_name: &str,
    ) -> Result<String, IntegrationError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", folder), ("timestamp", timestamp.as_str())],
            self.api_secret.expose(),
        );

        let file = Part::bytes(bytes.to_vec())
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(IntegrationError::transport(SERVICE))?;
        let form = Form::new()
            .part("file", file)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature);

        tracing::debug!("Uploading {} ({} bytes) to Cloudinary folder {}", file_name, bytes.len(), folder);

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(IntegrationError::transport(SERVICE))?;
        let response = check_status(SERVICE, response).await?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(IntegrationError::transport(SERVICE))?;
        body.secure_url.ok_or_else(|| IntegrationError::Malformed {
            service: SERVICE,
            detail: "upload response has no secure_url".to_string(),
        })
    }
}
