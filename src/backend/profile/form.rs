/**
 * Profile Update Form
 *
 * `PATCH /api/user/updateProfile` accepts either a JSON body or a
 * `multipart/form-data` form. This extractor turns both into a
 * `ProfileUpdate` plus an optional avatar image.
 *
 * # Multipart Fields
 *
 * Text fields use the same names as the JSON body (`fullName`, `bio`,
 * `school`, `college`, `relationshipStatus`, `profilePicture`). A
 * `profilePicture` part that carries a file name is the avatar upload and
 * takes precedence over a `profilePicture` URL.
 */

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use bytes::Bytes;

use crate::backend::error::BackendError;
use crate::backend::integrations::MediaStore;
use crate::shared::social::{ProfileUpdate, RelationshipStatus};

/// Largest accepted avatar (10 MiB).
pub const MAX_AVATAR_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// An uploaded avatar that passed the type and size checks.
#[derive(Debug, Clone)]
pub struct Avatar {
    pub bytes: Bytes,
    pub content_type: String,
    pub file_name: String,
}

impl Avatar {
    pub(crate) fn new(
        bytes: Bytes,
        content_type: Option<&str>,
        file_name: String,
    ) -> Result<Self, BackendError> {
        let content_type = content_type.unwrap_or_default().to_ascii_lowercase();
        if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(BackendError::invalid_input(
                "Only JPEG, JPG, PNG, or GIF images are allowed",
            ));
        }
        if bytes.len() > MAX_AVATAR_BYTES {
            return Err(BackendError::invalid_input(
                "Image must be 10 MB or smaller",
            ));
        }
        Ok(Self {
            bytes,
            content_type,
            file_name,
        })
    }
}

impl Avatar {
    /// Store the image in `folder` of the media store.
    pub async fn upload(
        self,
        media: Option<&dyn MediaStore>,
        folder: &str,
    ) -> Result<String, BackendError> {
        let media = media.ok_or_else(|| {
            tracing::warn!("Image upload attempted but no media store is configured");
            BackendError::unavailable("Image uploads are not configured")
        })?;
        media
            .upload(folder, self.bytes, &self.content_type, &self.file_name)
            .await
            .map_err(|e| {
                tracing::error!("Upload of {} failed: {}", self.file_name, e);
                BackendError::from(e)
            })
    }
}

#[derive(Debug, Default)]
pub struct ProfileForm {
    pub update: ProfileUpdate,
    pub avatar: Option<Avatar>,
}

impl ProfileForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, BackendError> {
        let mut form = ProfileForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| BackendError::invalid_input(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(file_name) = field.file_name().map(str::to_string) {
                if name != "profilePicture" {
                    return Err(BackendError::invalid_input(format!(
                        "Unexpected file field '{}'",
                        name
                    )));
                }
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| BackendError::invalid_input(e.body_text()))?;
                form.avatar = Some(Avatar::new(bytes, content_type.as_deref(), file_name)?);
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| BackendError::invalid_input(e.body_text()))?;
            let update = &mut form.update;
            match name.as_str() {
                "fullName" => update.full_name = Some(value),
                "bio" => update.bio = Some(value),
                "school" => update.school = Some(value),
                "college" => update.college = Some(value),
                "relationshipStatus" => {
                    let status = RelationshipStatus::parse(&value).ok_or_else(|| {
                        BackendError::invalid_input("Invalid relationship status")
                    })?;
                    update.relationship_status = Some(status);
                }
                "profilePicture" => update.profile_picture = Some(value),
                other => tracing::debug!("Ignoring unknown profile field '{}'", other),
            }
        }

        Ok(form)
    }
}

impl<S> FromRequest<S> for ProfileForm
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| BackendError::invalid_input(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        let Json(update) = Json::<ProfileUpdate>::from_request(req, state).await?;
        Ok(ProfileForm {
            update,
            avatar: None,
        })
    }
}
