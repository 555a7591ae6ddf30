//! Profile Data Structures
//!
//! Client-facing views of a user account and the partial update a client
//! may submit. None of these types carry the password hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_PROFILE_PICTURE: &str =
    "https://www.shutterstock.com/image-vector/vector-flat-illustration-grayscale-avatar-600nw-2264922221.jpg";

pub const DEFAULT_BIO: &str = "Hello, I am using ShuvoMedia!";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RelationshipStatus {
    #[serde(rename = "Single")]
    Single,
    #[serde(rename = "In a relationship")]
    InARelationship,
    #[serde(rename = "Married")]
    Married,
    #[serde(rename = "Complicated")]
    Complicated,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl RelationshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipStatus::Single => "Single",
            RelationshipStatus::InARelationship => "In a relationship",
            RelationshipStatus::Married => "Married",
            RelationshipStatus::Complicated => "Complicated",
            RelationshipStatus::Unspecified => "",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Single" => Some(RelationshipStatus::Single),
            "In a relationship" => Some(RelationshipStatus::InARelationship),
            "Married" => Some(RelationshipStatus::Married),
            "Complicated" => Some(RelationshipStatus::Complicated),
            "" => Some(RelationshipStatus::Unspecified),
            _ => None,
        }
    }
}

/// Full profile, returned to the account owner and on profile lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub profile_picture: String,
    pub bio: String,
    pub school: Option<String>,
    pub college: Option<String>,
    pub relationship_status: RelationshipStatus,
    pub friends: Vec<Uuid>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fields other users see in friend lists and request listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: Uuid,
    pub full_name: String,
    pub profile_picture: String,
    pub bio: String,
}

/// Partial profile update.
///
/// Every field is optional and only the ones that are `Some` are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub relationship_status: Option<RelationshipStatus>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.bio.is_none()
            && self.school.is_none()
            && self.college.is_none()
            && self.relationship_status.is_none()
            && self.profile_picture.is_none()
    }
}
