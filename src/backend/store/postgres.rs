/**
 * Postgres Store
 *
 * `sqlx` implementation of the user and friend-graph stores. Schema lives
 * in `migrations/`.
 *
 * Friend sets are rows of `friendships (user_id, friend_id)`; inserts use
 * `ON CONFLICT DO NOTHING` so adding a friend twice is a no-op. The
 * `friend_requests_pair_idx` unique index over the unordered pair keeps at
 * most one request per pair, whatever the direction.
 *
 * Group members live in `chat_group_members` with their join position, and
 * are read back as an ordered array alongside the group row.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{FriendGraphStore, GroupStore, StoreError, UserStore};
use crate::backend::auth::users::User;
use crate::shared::social::{
    FriendRequest, FriendRequestStatus, Group, GroupUpdate, ProfileUpdate, RelationshipStatus, Role,
};

const USER_COLUMNS: &str = r#"
    u.id, u.full_name, u.email, u.password_hash, u.profile_picture, u.bio,
    u.school, u.college, u.relationship_status, u.role, u.created_at, u.updated_at,
    ARRAY(SELECT f.friend_id FROM friendships f WHERE f.user_id = u.id) AS friends
"#;

const REQUEST_COLUMNS: &str = "id, sender_id, recipient_id, status, created_at";

const GROUP_COLUMNS: &str = r#"
    g.id, g.name, g.image, g.created_by, g.created_at, g.updated_at,
    ARRAY(SELECT m.user_id FROM chat_group_members m
          WHERE m.group_id = g.id ORDER BY m.position) AS members
"#;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    full_name: String,
    email: String,
    password_hash: String,
    profile_picture: String,
    bio: String,
    school: Option<String>,
    college: Option<String>,
    relationship_status: String,
    role: String,
    friends: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let relationship_status = RelationshipStatus::parse(&row.relationship_status)
            .ok_or_else(|| {
                StoreError::Backend(format!(
                    "unknown relationship status '{}' for user {}",
                    row.relationship_status, row.id
                ))
            })?;
        let role = Role::parse(&row.role).ok_or_else(|| {
            StoreError::Backend(format!("unknown role '{}' for user {}", row.role, row.id))
        })?;

        Ok(User {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            password_hash: row.password_hash,
            profile_picture: row.profile_picture,
            bio: row.bio,
            school: row.school,
            college: row.college,
            relationship_status,
            friends: row.friends.into_iter().collect(),
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FriendRequestRow {
    id: Uuid,
    sender_id: Uuid,
    recipient_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<FriendRequestRow> for FriendRequest {
    type Error = StoreError;

    fn try_from(row: FriendRequestRow) -> Result<Self, Self::Error> {
        let status = FriendRequestStatus::parse(&row.status).ok_or_else(|| {
            StoreError::Backend(format!("unknown status '{}' for request {}", row.status, row.id))
        })?;
        Ok(FriendRequest {
            id: row.id,
            sender: row.sender_id,
            recipient: row.recipient_id,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GroupRow {
    id: Uuid,
    name: String,
    image: String,
    created_by: Uuid,
    members: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Group {
            id: row.id,
            name: row.name,
            image: row.image,
            members: row.members,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn map_insert_error(err: sqlx::Error, entity: &'static str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Duplicate { entity }
        }
        _ => StoreError::from(err),
    }
}

fn users_from_rows(rows: Vec<UserRow>) -> Result<Vec<User>, StoreError> {
    rows.into_iter().map(User::try_from).collect()
}

fn requests_from_rows(rows: Vec<FriendRequestRow>) -> Result<Vec<FriendRequest>, StoreError> {
    rows.into_iter().map(FriendRequest::try_from).collect()
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users u WHERE u.id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users u WHERE u.email = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {} FROM users u WHERE u.id = ANY($1)", USER_COLUMNS);
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        users_from_rows(rows)
    }

    async fn list_except(&self, id: Uuid) -> Result<Vec<User>, StoreError> {
        let sql = format!(
            "SELECT {} FROM users u WHERE u.id <> $1 ORDER BY u.created_at, u.id",
            USER_COLUMNS
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        users_from_rows(rows)
    }

    async fn create(&self, user: User) -> Result<User, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, full_name, email, password_hash, profile_picture, bio,
                               school, college, relationship_status, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.profile_picture)
        .bind(&user.bio)
        .bind(&user.school)
        .bind(&user.college)
        .bind(user.relationship_status.as_str())
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "User"))?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET full_name = COALESCE($2, full_name),
                bio = COALESCE($3, bio),
                school = COALESCE($4, school),
                college = COALESCE($5, college),
                relationship_status = COALESCE($6, relationship_status),
                profile_picture = COALESCE($7, profile_picture),
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(update.full_name.as_deref())
        .bind(update.bio.as_deref())
        .bind(update.school.as_deref())
        .bind(update.college.as_deref())
        .bind(update.relationship_status.map(|s| s.as_str()))
        .bind(update.profile_picture.as_deref())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }
}

#[async_trait]
impl FriendGraphStore for PgStore {
    async fn add_friend(&self, user_id: Uuid, friend_id: Uuid) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO friendships (user_id, friend_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, friend_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(friend_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn create_request(&self, request: FriendRequest) -> Result<FriendRequest, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO friend_requests (id, sender_id, recipient_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(request.id)
        .bind(request.sender)
        .bind(request.recipient)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "Friend request"))?;

        Ok(request)
    }

    async fn find_request(&self, id: Uuid) -> Result<Option<FriendRequest>, StoreError> {
        let sql = format!("SELECT {} FROM friend_requests WHERE id = $1", REQUEST_COLUMNS);
        let row = sqlx::query_as::<_, FriendRequestRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(FriendRequest::try_from).transpose()
    }

    async fn find_open_between(
        &self,
        a: Uuid,
        b: Uuid,
    ) -> Result<Option<FriendRequest>, StoreError> {
        let sql = format!(
            r#"
            SELECT {} FROM friend_requests
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            LIMIT 1
            "#,
            REQUEST_COLUMNS
        );
        let row = sqlx::query_as::<_, FriendRequestRow>(&sql)
            .bind(a)
            .bind(b)
            .fetch_optional(&self.pool)
            .await?;
        row.map(FriendRequest::try_from).transpose()
    }

    async fn claim_for_accept(&self, id: Uuid, recipient: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE friend_requests
            SET status = 'accepted'
            WHERE id = $1 AND recipient_id = $2 AND status IN ('pending', 'accepted')
            "#,
        )
        .bind(id)
        .bind(recipient)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_request(
        &self,
        id: Uuid,
        expected: FriendRequestStatus,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM friend_requests WHERE id = $1 AND status = $2")
            .bind(id)
            .bind(expected.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn pending_for_recipient(&self, user_id: Uuid) -> Result<Vec<FriendRequest>, StoreError> {
        let sql = format!(
            "SELECT {} FROM friend_requests WHERE recipient_id = $1 AND status = 'pending' ORDER BY created_at DESC",
            REQUEST_COLUMNS
        );
        let rows = sqlx::query_as::<_, FriendRequestRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        requests_from_rows(rows)
    }

    async fn pending_for_sender(&self, user_id: Uuid) -> Result<Vec<FriendRequest>, StoreError> {
        let sql = format!(
            "SELECT {} FROM friend_requests WHERE sender_id = $1 AND status = 'pending' ORDER BY created_at DESC",
            REQUEST_COLUMNS
        );
        let rows = sqlx::query_as::<_, FriendRequestRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        requests_from_rows(rows)
    }

    async fn open_for_user(&self, user_id: Uuid) -> Result<Vec<FriendRequest>, StoreError> {
        let sql = format!(
            "SELECT {} FROM friend_requests WHERE sender_id = $1 OR recipient_id = $1",
            REQUEST_COLUMNS
        );
        let rows = sqlx::query_as::<_, FriendRequestRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        requests_from_rows(rows)
    }
}

#[async_trait]
impl GroupStore for PgStore {
    async fn create_group(&self, group: Group) -> Result<Group, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO chat_groups (id, name, image, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(&group.image)
        .bind(group.created_by)
        .bind(group.created_at)
        .bind(group.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, "Group"))?;

        sqlx::query(
            r#"
            INSERT INTO chat_group_members (group_id, user_id, position)
            SELECT $1, m.user_id, m.position
            FROM UNNEST($2::uuid[]) WITH ORDINALITY AS m(user_id, position)
            "#,
        )
        .bind(group.id)
        .bind(&group.members)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(group)
    }

    async fn find_group(&self, id: Uuid) -> Result<Option<Group>, StoreError> {
        let sql = format!("SELECT {} FROM chat_groups g WHERE g.id = $1", GROUP_COLUMNS);
        let row = sqlx::query_as::<_, GroupRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Group::from))
    }

    async fn groups_for_member(&self, user_id: Uuid) -> Result<Vec<Group>, StoreError> {
        let sql = format!(
            r#"
            SELECT {} FROM chat_groups g
            WHERE EXISTS (
                SELECT 1 FROM chat_group_members m WHERE m.group_id = g.id AND m.user_id = $1
            )
            ORDER BY g.created_at, g.id
            "#,
            GROUP_COLUMNS
        );
        let rows = sqlx::query_as::<_, GroupRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Group::from).collect())
    }

    async fn update_group(
        &self,
        id: Uuid,
        update: &GroupUpdate,
    ) -> Result<Option<Group>, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE chat_groups
            SET name = COALESCE($2, name),
                image = COALESCE($3, image),
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.image.as_deref())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_group(id).await
    }
}
