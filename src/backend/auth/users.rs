/**
 * User Model
 *
 * This module defines the stored user record and its client-facing views.
 * `User` deliberately does not implement `Serialize`: the only way to send
 * a user over the wire is through `to_profile` or `to_public`, neither of
 * which carries the password hash.
 */

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::social::profile::{DEFAULT_BIO, DEFAULT_PROFILE_PICTURE};
use crate::shared::social::{ProfileUpdate, PublicProfile, RelationshipStatus, Role, UserProfile};

/// User record as held by the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name
    pub full_name: String,
    /// Email address, trimmed and lower-cased
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Avatar URL
    pub profile_picture: String,
    pub bio: String,
    pub school: Option<String>,
    pub college: Option<String>,
    pub relationship_status: RelationshipStatus,
    /// Friend ids; symmetric across users, written only by the friend engine
    pub friends: BTreeSet<Uuid>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh account with profile defaults.
    pub fn new(id: Uuid, full_name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            full_name,
            email,
            password_hash,
            profile_picture: DEFAULT_PROFILE_PICTURE.to_string(),
            bio: DEFAULT_BIO.to_string(),
            school: None,
            college: None,
            relationship_status: RelationshipStatus::Unspecified,
            friends: BTreeSet::new(),
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_friend_of(&self, other: Uuid) -> bool {
        self.friends.contains(&other)
    }

    /// Apply every field that is set on `update`.
    pub fn apply_update(&mut self, update: &ProfileUpdate) {
        if let Some(full_name) = &update.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(bio) = &update.bio {
            self.bio = bio.clone();
        }
        if let Some(school) = &update.school {
            self.school = Some(school.clone());
        }
        if let Some(college) = &update.college {
            self.college = Some(college.clone());
        }
        if let Some(status) = update.relationship_status {
            self.relationship_status = status;
        }
        if let Some(picture) = &update.profile_picture {
            self.profile_picture = picture.clone();
        }
        self.updated_at = Utc::now();
    }

    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            profile_picture: self.profile_picture.clone(),
            bio: self.bio.clone(),
            school: self.school.clone(),
            college: self.college.clone(),
            relationship_status: self.relationship_status,
            friends: self.friends.iter().copied().collect(),
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn to_public(&self) -> PublicProfile {
        PublicProfile {
            id: self.id,
            full_name: self.full_name.clone(),
            profile_picture: self.profile_picture.clone(),
            bio: self.bio.clone(),
        }
    }
}
