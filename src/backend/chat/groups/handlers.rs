//! Group HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::engine;
use super::form::GroupForm;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::profile::handlers::parse_id;
use crate::backend::server::state::AppState;
use crate::shared::social::{GroupResponse, ListGroupsResponse};

/// POST /groups
pub async fn create_group(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    form: GroupForm,
) -> Result<(StatusCode, Json<GroupResponse>), BackendError> {
    let group = engine::create_group(
        &state.stores,
        state.chat.as_deref(),
        state.media.as_deref(),
        &user,
        form,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(GroupResponse {
            message: "Group created successfully".to_string(),
            group,
        }),
    ))
}

/// GET /groups
pub async fn get_groups(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ListGroupsResponse>, BackendError> {
    let groups = engine::groups_for(&state.stores, &user).await?;
    Ok(Json(ListGroupsResponse {
        message: "Groups retrieved successfully".to_string(),
        groups,
    }))
}

/// PATCH /groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    form: GroupForm,
) -> Result<Json<GroupResponse>, BackendError> {
    let group_id = parse_id(&id, "group")?;
    let group = engine::update_group(
        &state.stores,
        state.chat.as_deref(),
        state.media.as_deref(),
        &user,
        group_id,
        form,
    )
    .await?;

    Ok(Json(GroupResponse {
        message: "Group updated successfully".to_string(),
        group,
    }))
}
