//! Group repository implementation

use crate::database::connection::ConnectionPool;
use crate::database::schema::tables;
use crate::models::group::{AddMemberRequest, CreateGroupRequest, Group, GroupMember, UpdateGroupRequest};
use crate::utils::errors::{StoreError, StoreResult};
use crate::utils::logging::timed_operation;

#[derive(Clone, Debug)]
pub struct GroupRepository {
    pool: ConnectionPool,
}

impl GroupRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Create a new group
    pub async fn create(&self, request: CreateGroupRequest) -> StoreResult<Group> {
        timed_operation("create", tables::GROUPS, async move {
            let mut conn = self.pool.acquire().await?;
            let group = sqlx::query_as::<_, Group>(
                r#"
                INSERT INTO groups (name, description)
                VALUES ($1, $2)
                RETURNING id, name, description
                "#,
            )
            .bind(request.name)
            .bind(request.description)
            .fetch_one(&mut *conn)
            .await?;

            Ok(group)
        })
        .await
    }

    /// Find group by ID
    pub async fn get(&self, id: i32) -> StoreResult<Group> {
        timed_operation("get", tables::GROUPS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, Group>("SELECT id, name, description FROM groups WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?
                .ok_or_else(|| StoreError::not_found(tables::GROUPS, id))
        })
        .await
    }

    pub async fn list(&self) -> StoreResult<Vec<Group>> {
        timed_operation("list", tables::GROUPS, async move {
            let mut conn = self.pool.acquire().await?;
            let groups =
                sqlx::query_as::<_, Group>("SELECT id, name, description FROM groups ORDER BY id")
                    .fetch_all(&mut *conn)
                    .await?;

            Ok(groups)
        })
        .await
    }

    /// Update group
    pub async fn update(&self, id: i32, request: UpdateGroupRequest) -> StoreResult<Group> {
        timed_operation("update", tables::GROUPS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, Group>(
                r#"
                UPDATE groups
                SET name = $2,
                    description = $3
                WHERE id = $1
                RETURNING id, name, description
                "#,
            )
            .bind(id)
            .bind(request.name)
            .bind(request.description)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::GROUPS, id))
        })
        .await
    }

    /// Delete group. Memberships stay with a null group reference.
    pub async fn delete(&self, id: i32) -> StoreResult<Group> {
        timed_operation("delete", tables::GROUPS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, Group>(
                "DELETE FROM groups WHERE id = $1 RETURNING id, name, description",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::GROUPS, id))
        })
        .await
    }

    /// Add member to group
    ///
    /// Adding the same user to the same group twice is a uniqueness
    /// violation.
    pub async fn add_member(&self, request: AddMemberRequest) -> StoreResult<GroupMember> {
        timed_operation("add_member", tables::GROUP_MEMBERS, async move {
            let mut conn = self.pool.acquire().await?;
            let member = sqlx::query_as::<_, GroupMember>(
                r#"
                INSERT INTO user_group_members (user_id, group_id)
                VALUES ($1, $2)
                RETURNING id, user_id, group_id
                "#,
            )
            .bind(request.user_id)
            .bind(request.group_id)
            .fetch_one(&mut *conn)
            .await?;

            Ok(member)
        })
        .await
    }

    /// Every membership row, orphaned ones included
    pub async fn list_memberships(&self) -> StoreResult<Vec<GroupMember>> {
        timed_operation("list_memberships", tables::GROUP_MEMBERS, async move {
            let mut conn = self.pool.acquire().await?;
            let members = sqlx::query_as::<_, GroupMember>(
                "SELECT id, user_id, group_id FROM user_group_members ORDER BY id",
            )
            .fetch_all(&mut *conn)
            .await?;

            Ok(members)
        })
        .await
    }

    /// Get group members
    pub async fn list_members(&self, group_id: i32) -> StoreResult<Vec<GroupMember>> {
        timed_operation("list_members", tables::GROUP_MEMBERS, async move {
            let mut conn = self.pool.acquire().await?;
            let members = sqlx::query_as::<_, GroupMember>(
                "SELECT id, user_id, group_id FROM user_group_members WHERE group_id = $1 ORDER BY id",
            )
            .bind(group_id)
            .fetch_all(&mut *conn)
            .await?;

            Ok(members)
        })
        .await
    }

    /// Remove a membership row by its id
    pub async fn remove_member(&self, id: i32) -> StoreResult<GroupMember> {
        timed_operation("remove_member", tables::GROUP_MEMBERS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, GroupMember>(
                "DELETE FROM user_group_members WHERE id = $1 RETURNING id, user_id, group_id",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::GROUP_MEMBERS, id))
        })
        .await
    }

    /// Count total groups
    pub async fn count(&self) -> StoreResult<i64> {
        timed_operation("count", tables::GROUPS, async move {
            let mut conn = self.pool.acquire().await?;
            let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM groups")
                .fetch_one(&mut *conn)
                .await?;

            Ok(count.0)
        })
        .await
    }
}
