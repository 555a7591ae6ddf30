/**
 * Group Form
 *
 * Group create and update accept a JSON body or a `multipart/form-data`
 * form with an optional `image` file.
 *
 * `members` is a list of user id strings. In a multipart form it arrives
 * as one text field holding a JSON array, e.g. `["<id>", "<id>"]`; JSON
 * bodies may send either the array itself or that same encoded string.
 */

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::profile::Avatar;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MemberList {
    Ids(Vec<String>),
    Encoded(String),
}

impl MemberList {
    fn into_ids(self) -> Result<Vec<String>, BackendError> {
        match self {
            MemberList::Ids(ids) => Ok(ids),
            MemberList::Encoded(raw) => decode_members(&raw),
        }
    }
}

fn decode_members(raw: &str) -> Result<Vec<String>, BackendError> {
    serde_json::from_str(raw)
        .map_err(|_| BackendError::invalid_input("Members must be a JSON array of user IDs"))
}

#[derive(Debug, Default, Deserialize)]
struct GroupBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    members: Option<MemberList>,
}

#[derive(Debug, Default)]
pub struct GroupForm {
    pub name: Option<String>,
    /// Raw member ids, validated by the engine.
    pub members: Vec<String>,
    pub image: Option<Avatar>,
}

impl GroupForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, BackendError> {
        let mut form = GroupForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| BackendError::invalid_input(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(file_name) = field.file_name().map(str::to_string) {
                if name != "image" {
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
                form.image = Some(Avatar::new(bytes, content_type.as_deref(), file_name)?);
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| BackendError::invalid_input(e.body_text()))?;
            match name.as_str() {
                "name" => form.name = Some(value),
                "members" => form.members = decode_members(&value)?,
                other => tracing::debug!("Ignoring unknown group field '{}'", other),
            }
        }

        Ok(form)
    }
}

impl<S> FromRequest<S> for GroupForm
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

        let Json(body) = Json::<GroupBody>::from_request(req, state).await?;
        let members = match body.members {
            Some(list) => list.into_ids()?,
            None => Vec::new(),
        };
        Ok(GroupForm {
            name: body.name,
            members,
            image: None,
        })
    }
}
