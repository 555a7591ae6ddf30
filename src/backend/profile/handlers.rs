/**
 * Profile Handlers
 *
 * - `GET /api/user/getMe` - the caller's own profile
 * - `GET /api/user/profile/{id}` - any user's profile
 * - `PATCH /api/user/updateProfile` - partial update, optionally with an
 *   avatar upload
 */

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::form::ProfileForm;
use crate::backend::chat::sync_user;
use crate::backend::error::BackendError;
use crate::backend::integrations::PROFILE_FOLDER;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::social::UserProfile;

#[derive(Serialize, Deserialize, Debug)]
pub struct ProfileResponse {
    pub message: String,
    pub user: UserProfile,
}

pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| BackendError::invalid_input(format!("Invalid {} id", what)))
}

pub async fn get_me(AuthUser(user): AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "User profile retrieved successfully".to_string(),
        user: user.to_profile(),
    })
}

pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ProfileResponse>, BackendError> {
    let id = parse_id(&id, "user")?;
    let user = state
        .stores
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(ProfileResponse {
        message: "User profile retrieved successfully".to_string(),
        user: user.to_profile(),
    }))
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    form: ProfileForm,
) -> Result<Json<ProfileResponse>, BackendError> {
    let ProfileForm { mut update, avatar } = form;

    if let Some(name) = &update.full_name {
        if name.trim().is_empty() {
            return Err(BackendError::invalid_input("Full name cannot be empty"));
        }
    }

    if let Some(avatar) = avatar {
        let url = avatar
            .upload(state.media.as_deref(), PROFILE_FOLDER)
            .await?;
        update.profile_picture = Some(url);
    }

    if update.is_empty() {
        return Err(BackendError::invalid_input(
            "At least one field must be provided to update",
        ));
    }

    let updated = state
        .stores
        .users
        .update_profile(user.id, &update)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    sync_user(state.chat.as_deref(), &updated).await?;

    tracing::info!("Profile updated for user {}", updated.id);

    Ok(Json(ProfileResponse {
        message: "Profile updated successfully".to_string(),
        user: updated.to_profile(),
    }))
}
