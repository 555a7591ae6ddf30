//! Chat Groups
//!
//! A group is a named member list backed by one chat channel. The channel
//! id is the group id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::PublicProfile;

pub const DEFAULT_GROUP_IMAGE: &str =
    "https://www.shutterstock.com/image-vector/vector-flat-illustration-grayscale-group-avatar-600nw-2264922221.jpg";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    /// Member ids in join order. The creator is always included.
    pub members: Vec<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: String, image: Option<String>, members: Vec<Uuid>, created_by: Uuid) -> Self {
        let now = Utc::now();
        let mut group = Self {
            id: Uuid::new_v4(),
            name,
            image: image.unwrap_or_else(|| DEFAULT_GROUP_IMAGE.to_string()),
            members: Vec::with_capacity(members.len() + 1),
            created_by,
            created_at: now,
            updated_at: now,
        };
        for id in members.into_iter().chain(std::iter::once(created_by)) {
            if !group.members.contains(&id) {
                group.members.push(id);
            }
        }
        group
    }

    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }

    pub fn apply_update(&mut self, update: &GroupUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(image) = &update.image {
            self.image = image.clone();
        }
        self.updated_at = Utc::now();
    }
}

/// Partial group update. Members cannot be changed after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl GroupUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.image.is_none()
    }
}

/// A group with its members joined in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub members: Vec<PublicProfile>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    pub message: String,
    pub group: GroupView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListGroupsResponse {
    pub message: String,
    pub groups: Vec<GroupView>,
}
