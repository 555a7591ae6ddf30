//! In-memory store.
//!
//! All state sits behind one async mutex, so every trait method is a single
//! atomic step. That gives the same guarantees the Postgres store gets from
//! its unique index and conditional updates.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{FriendGraphStore, GroupStore, StoreError, UserStore};
use crate::backend::auth::users::User;
use crate::shared::social::{FriendRequest, FriendRequestStatus, Group, GroupUpdate, ProfileUpdate};

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    requests: HashMap<Uuid, FriendRequest>,
    groups: HashMap<Uuid, Group>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut requests: Vec<FriendRequest>) -> Vec<FriendRequest> {
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    requests
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError> {
        let state = self.state.lock().await;
        Ok(ids.iter().filter_map(|id| state.users.get(id).cloned()).collect())
    }

    async fn list_except(&self, id: Uuid) -> Result<Vec<User>, StoreError> {
        let state = self.state.lock().await;
        let mut users: Vec<User> = state
            .users
            .values()
            .filter(|u| u.id != id)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn create(&self, user: User) -> Result<User, StoreError> {
        let mut state = self.state.lock().await;
        if state.users.contains_key(&user.id) || state.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate { entity: "User" });
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, StoreError> {
        let mut state = self.state.lock().await;
        Ok(state.users.get_mut(&id).map(|user| {
            user.apply_update(update);
            user.clone()
        }))
    }
}

#[async_trait]
impl FriendGraphStore for MemoryStore {
    async fn add_friend(&self, user_id: Uuid, friend_id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| StoreError::Backend(format!("user {} does not exist", user_id)))?;
        if user.friends.insert(friend_id) {
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn create_request(&self, request: FriendRequest) -> Result<FriendRequest, StoreError> {
        let mut state = self.state.lock().await;
        let exists = state
            .requests
            .values()
            .any(|r| r.involves_pair(request.sender, request.recipient));
        if exists {
            return Err(StoreError::Duplicate { entity: "Friend request" });
        }
        state.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_request(&self, id: Uuid) -> Result<Option<FriendRequest>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.requests.get(&id).cloned())
    }

    async fn find_open_between(
        &self,
        a: Uuid,
        b: Uuid,
    ) -> Result<Option<FriendRequest>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.requests.values().find(|r| r.involves_pair(a, b)).cloned())
    }

    async fn claim_for_accept(&self, id: Uuid, recipient: Uuid) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        match state.requests.get_mut(&id) {
            Some(request)
                if request.recipient == recipient
                    && matches!(
                        request.status,
                        FriendRequestStatus::Pending | FriendRequestStatus::Accepted
                    ) =>
            {
                request.status = FriendRequestStatus::Accepted;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_request(
        &self,
        id: Uuid,
        expected: FriendRequestStatus,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        match state.requests.get(&id) {
            Some(request) if request.status == expected => {
                state.requests.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn pending_for_recipient(&self, user_id: Uuid) -> Result<Vec<FriendRequest>, StoreError> {
        let state = self.state.lock().await;
        Ok(newest_first(
            state
                .requests
                .values()
                .filter(|r| r.recipient == user_id && r.is_pending())
                .cloned()
                .collect(),
        ))
    }

    async fn pending_for_sender(&self, user_id: Uuid) -> Result<Vec<FriendRequest>, StoreError> {
        let state = self.state.lock().await;
        Ok(newest_first(
            state
                .requests
                .values()
                .filter(|r| r.sender == user_id && r.is_pending())
                .cloned()
                .collect(),
        ))
    }

    async fn open_for_user(&self, user_id: Uuid) -> Result<Vec<FriendRequest>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .requests
            .values()
            .filter(|r| r.sender == user_id || r.recipient == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl GroupStore for MemoryStore {
    async fn create_group(&self, group: Group) -> Result<Group, StoreError> {
        let mut state = self.state.lock().await;
        if state.groups.contains_key(&group.id) {
            return Err(StoreError::Duplicate { entity: "Group" });
        }
        state.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn find_group(&self, id: Uuid) -> Result<Option<Group>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.groups.get(&id).cloned())
    }

    async fn groups_for_member(&self, user_id: Uuid) -> Result<Vec<Group>, StoreError> {
        let state = self.state.lock().await;
        let mut groups: Vec<Group> = state
            .groups
            .values()
            .filter(|g| g.is_member(user_id))
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(groups)
    }

    async fn update_group(
        &self,
        id: Uuid,
        update: &GroupUpdate,
    ) -> Result<Option<Group>, StoreError> {
        let mut state = self.state.lock().await;
        Ok(state.groups.get_mut(&id).map(|group| {
            group.apply_update(update);
            group.clone()
        }))
    }
}
