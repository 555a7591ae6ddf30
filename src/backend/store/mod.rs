//! Storage Module
//!
//! Repository interfaces for user records, the friend graph and chat
//! groups, with two implementations:
//!
//! - **`memory`** - A process-local store, used when no database is
//!   configured and throughout the tests
//! - **`postgres`** - The `sqlx` Postgres store used in deployments
//!
//! Callers only see the traits. Joins are done by fetching ids and then
//! batch-fetching the referenced users, so no query syntax leaks out of
//! this module.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::shared::social::{FriendRequest, FriendRequestStatus, Group, GroupUpdate, ProfileUpdate};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("{entity} already exists")]
    Duplicate { entity: &'static str },

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Credential store: user records keyed by id and by email.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Look up by an already-normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Batch fetch. Unknown ids are skipped; order is unspecified.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError>;

    /// Every user except `id`.
    async fn list_except(&self, id: Uuid) -> Result<Vec<User>, StoreError>;

    /// Insert a new user. Fails with `Duplicate` when the email is taken.
    async fn create(&self, user: User) -> Result<User, StoreError>;

    /// Apply a partial update and return the new record, or `None` if the
    /// user does not exist.
    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, StoreError>;
}

/// Friend sets and open friend requests.
#[async_trait]
pub trait FriendGraphStore: Send + Sync {
    /// Add `friend_id` to `user_id`'s friend set. Adding an existing friend
    /// is a no-op.
    async fn add_friend(&self, user_id: Uuid, friend_id: Uuid) -> Result<(), StoreError>;

    /// Insert a request. Fails with `Duplicate` when any request already
    /// exists between the same two users, in either direction.
    async fn create_request(&self, request: FriendRequest) -> Result<FriendRequest, StoreError>;

    async fn find_request(&self, id: Uuid) -> Result<Option<FriendRequest>, StoreError>;

    /// The request between `a` and `b` in either direction, if any.
    async fn find_open_between(&self, a: Uuid, b: Uuid)
        -> Result<Option<FriendRequest>, StoreError>;

    /// Move a request addressed to `recipient` into `Accepted`. Returns
    /// `false` when the request is gone or no longer claimable. Claiming an
    /// already accepted request succeeds, so an interrupted accept can be
    /// retried.
    async fn claim_for_accept(&self, id: Uuid, recipient: Uuid) -> Result<bool, StoreError>;

    /// Delete a request only if it is still in `expected` state. Returns
    /// whether a row was removed.
    async fn delete_request(
        &self,
        id: Uuid,
        expected: FriendRequestStatus,
    ) -> Result<bool, StoreError>;

    /// Pending requests addressed to `user_id`, newest first.
    async fn pending_for_recipient(&self, user_id: Uuid) -> Result<Vec<FriendRequest>, StoreError>;

    /// Pending requests sent by `user_id`, newest first.
    async fn pending_for_sender(&self, user_id: Uuid) -> Result<Vec<FriendRequest>, StoreError>;

    /// Every request `user_id` takes part in, whatever its status.
    async fn open_for_user(&self, user_id: Uuid) -> Result<Vec<FriendRequest>, StoreError>;
}

/// Chat groups and their member lists.
#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn create_group(&self, group: Group) -> Result<Group, StoreError>;

    async fn find_group(&self, id: Uuid) -> Result<Option<Group>, StoreError>;

    /// Groups `user_id` is a member of, oldest first.
    async fn groups_for_member(&self, user_id: Uuid) -> Result<Vec<Group>, StoreError>;

    /// Apply a partial update and return the new record, or `None` if the
    /// group does not exist.
    async fn update_group(
        &self,
        id: Uuid,
        update: &GroupUpdate,
    ) -> Result<Option<Group>, StoreError>;
}

/// The stores shared by every handler.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub graph: Arc<dyn FriendGraphStore>,
    pub groups: Arc<dyn GroupStore>,
}

impl Stores {
    pub fn new(
        users: Arc<dyn UserStore>,
        graph: Arc<dyn FriendGraphStore>,
        groups: Arc<dyn GroupStore>,
    ) -> Self {
        Self { users, graph, groups }
    }

    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            users: store.clone(),
            graph: store.clone(),
            groups: store,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            users: store.clone(),
            graph: store.clone(),
            groups: store,
        }
    }
}
