//! User repository implementation

use crate::database::connection::ConnectionPool;
use crate::database::schema::tables;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User, UserSummary};
use crate::utils::errors::{StoreError, StoreResult};
use crate::utils::logging::timed_operation;

const USER_COLUMNS: &str = "id, username, email, birthdate, signup_date, name, organisation, \
                            subscriptions_id, language_id, customer_type_id";

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: ConnectionPool,
}

impl UserRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// Duplicate usernames or emails are uniqueness violations; a missing
    /// subscription, language or customer type is a reference violation.
    pub async fn create(&self, request: CreateUserRequest) -> StoreResult<UserSummary> {
        timed_operation("create", tables::USERS, async move {
            let mut conn = self.pool.acquire().await?;
            let user = sqlx::query_as::<_, UserSummary>(
                r#"
                INSERT INTO users (username, email, password, birthdate, subscriptions_id, language_id, customer_type_id, name, organisation)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING id, username, email
                "#,
            )
            .bind(request.username)
            .bind(request.email)
            .bind(request.password)
            .bind(request.birthdate)
            .bind(request.subscriptions_id)
            .bind(request.language_id)
            .bind(request.customer_type_id)
            .bind(request.name)
            .bind(request.organisation)
            .fetch_one(&mut *conn)
            .await?;

            Ok(user)
        })
        .await
    }

    /// Find user by ID
    pub async fn get(&self, id: i32) -> StoreResult<User> {
        timed_operation("get", tables::USERS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?
                .ok_or_else(|| StoreError::not_found(tables::USERS, id))
        })
        .await
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> StoreResult<User> {
        timed_operation("find_by_username", tables::USERS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
            ))
            .bind(username)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::USERS, username))
        })
        .await
    }

    /// List all users ordered by id
    pub async fn list(&self) -> StoreResult<Vec<User>> {
        timed_operation("list", tables::USERS, async move {
            let mut conn = self.pool.acquire().await?;
            let users =
                sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
                    .fetch_all(&mut *conn)
                    .await?;

            Ok(users)
        })
        .await
    }

    /// Replace every mutable field of a user
    pub async fn update(&self, id: i32, request: UpdateUserRequest) -> StoreResult<UserSummary> {
        timed_operation("update", tables::USERS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, UserSummary>(
                r#"
                UPDATE users
                SET username = $2,
                    email = $3,
                    password = $4,
                    birthdate = $5,
                    subscriptions_id = $6,
                    language_id = $7,
                    customer_type_id = $8,
                    name = $9,
                    organisation = $10
                WHERE id = $1
                RETURNING id, username, email
                "#,
            )
            .bind(id)
            .bind(request.username)
            .bind(request.email)
            .bind(request.password)
            .bind(request.birthdate)
            .bind(request.subscriptions_id)
            .bind(request.language_id)
            .bind(request.customer_type_id)
            .bind(request.name)
            .bind(request.organisation)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::USERS, id))
        })
        .await
    }

    /// Delete user by ID
    ///
    /// Ownership, favorite and membership rows of the user stay behind with
    /// a null user reference.
    pub async fn delete(&self, id: i32) -> StoreResult<UserSummary> {
        timed_operation("delete", tables::USERS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, UserSummary>(
                "DELETE FROM users WHERE id = $1 RETURNING id, username, email",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::USERS, id))
        })
        .await
    }

    /// Delete user by username
    pub async fn delete_by_username(&self, username: &str) -> StoreResult<UserSummary> {
        timed_operation("delete_by_username", tables::USERS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, UserSummary>(
                "DELETE FROM users WHERE username = $1 RETURNING id, username, email",
            )
            .bind(username)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::USERS, username))
        })
        .await
    }

    /// Count total users
    pub async fn count(&self) -> StoreResult<i64> {
        timed_operation("count", tables::USERS, async move {
            let mut conn = self.pool.acquire().await?;
            let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
                .fetch_one(&mut *conn)
                .await?;

            Ok(count.0)
        })
        .await
    }
}
