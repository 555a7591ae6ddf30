/**
 * Group Engine
 *
 * Create, list and rename chat groups. Each group owns one messaging
 * channel in the chat service, keyed by the group id.
 *
 * The channel is opened before the group is stored, so a failed channel
 * call leaves nothing behind. Renames go the same way: channel first, then
 * the record. Without a configured chat service both calls are skipped.
 */

use std::collections::HashMap;

use uuid::Uuid;

use super::form::GroupForm;
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::backend::integrations::{ChatService, MediaStore, GROUP_FOLDER};
use crate::backend::store::Stores;
use crate::shared::social::{Group, GroupUpdate, GroupView, PublicProfile};

const MISSING_FIELDS: &str = "Group name and at least one member are required";
const INVALID_MEMBERS: &str = "One or more member IDs are invalid";

/// Create a group owned by `actor`. `actor` is always a member.
pub async fn create_group(
    stores: &Stores,
    chat: Option<&dyn ChatService>,
    media: Option<&dyn MediaStore>,
    actor: &User,
    form: GroupForm,
) -> Result<GroupView, BackendError> {
    let GroupForm {
        name,
        members,
        image,
    } = form;

    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| BackendError::invalid_input(MISSING_FIELDS))?;
    if members.is_empty() {
        return Err(BackendError::invalid_input(MISSING_FIELDS));
    }

    let mut member_ids: Vec<Uuid> = Vec::with_capacity(members.len());
    for raw in &members {
        let id = Uuid::parse_str(raw.trim())
            .map_err(|_| BackendError::invalid_input(INVALID_MEMBERS))?;
        if !member_ids.contains(&id) {
            member_ids.push(id);
        }
    }

    let found = stores.users.find_many(&member_ids).await?;
    if found.len() != member_ids.len() {
        tracing::warn!(
            "User {} tried to create a group with unknown members",
            actor.id
        );
        return Err(BackendError::invalid_input(INVALID_MEMBERS));
    }

    let image = match image {
        Some(image) => Some(image.upload(media, GROUP_FOLDER).await?),
        None => None,
    };

    let group = Group::new(name, image, member_ids, actor.id);

    if let Some(chat) = chat {
        chat.create_channel(group.id, &group.name, &group.members, group.created_by)
            .await
            .map_err(|e| {
                tracing::error!("Failed to open channel for group {}: {}", group.id, e);
                BackendError::from(e)
            })?;
    } else {
        tracing::debug!("No chat service configured; skipping channel for group {}", group.id);
    }

    let group = stores.groups.create_group(group).await?;
    tracing::info!(
        "Group {} created by {} with {} members",
        group.id,
        actor.id,
        group.members.len()
    );

    let mut views = views_of(stores, vec![group]).await?;
    views
        .pop()
        .ok_or_else(|| BackendError::internal("created group vanished"))
}

/// Groups `actor` belongs to, oldest first.
pub async fn groups_for(stores: &Stores, actor: &User) -> Result<Vec<GroupView>, BackendError> {
    let groups = stores.groups.groups_for_member(actor.id).await?;
    views_of(stores, groups).await
}

/// Rename a group or replace its image. Only the creator may update.
pub async fn update_group(
    stores: &Stores,
    chat: Option<&dyn ChatService>,
    media: Option<&dyn MediaStore>,
    actor: &User,
    group_id: Uuid,
    form: GroupForm,
) -> Result<GroupView, BackendError> {
    let group = stores
        .groups
        .find_group(group_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Group not found"))?;

    if group.created_by != actor.id {
        tracing::warn!("User {} tried to update group {}", actor.id, group_id);
        return Err(BackendError::forbidden(
            "Only the group creator can update the group",
        ));
    }

    if !form.members.is_empty() {
        tracing::debug!("Ignoring member list on update of group {}", group_id);
    }

    let name = match form.name {
        Some(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(BackendError::invalid_input("Group name cannot be empty"));
            }
            Some(name)
        }
        None => None,
    };

    if name.is_none() && form.image.is_none() {
        return Err(BackendError::invalid_input(
            "At least one field must be provided to update",
        ));
    }

    let image = match form.image {
        Some(image) => Some(image.upload(media, GROUP_FOLDER).await?),
        None => None,
    };

    let update = GroupUpdate { name, image };

    if let (Some(chat), Some(name)) = (chat, update.name.as_deref()) {
        if name != group.name {
            chat.update_channel(group.id, name).await.map_err(|e| {
                tracing::error!("Failed to rename channel of group {}: {}", group.id, e);
                BackendError::from(e)
            })?;
        }
    }

    let updated = stores
        .groups
        .update_group(group_id, &update)
        .await?
        .ok_or_else(|| BackendError::not_found("Group not found"))?;

    tracing::info!("Group {} updated by {}", updated.id, actor.id);

    let mut views = views_of(stores, vec![updated]).await?;
    views
        .pop()
        .ok_or_else(|| BackendError::internal("updated group vanished"))
}

/// Join member profiles into each group, keeping member order.
async fn views_of(stores: &Stores, groups: Vec<Group>) -> Result<Vec<GroupView>, BackendError> {
    let mut ids: Vec<Uuid> = groups.iter().flat_map(|g| g.members.iter().copied()).collect();
    ids.sort_unstable();
    ids.dedup();

    let profiles: HashMap<Uuid, PublicProfile> = stores
        .users
        .find_many(&ids)
        .await?
        .iter()
        .map(|u| (u.id, u.to_public()))
        .collect();

    Ok(groups
        .into_iter()
        .map(|g| GroupView {
            members: g
                .members
                .iter()
                .filter_map(|id| profiles.get(id).cloned())
                .collect(),
            id: g.id,
            name: g.name,
            image: g.image,
            created_by: g.created_by,
            created_at: g.created_at,
            updated_at: g.updated_at,
        })
        .collect())
}
