//! Kahoot ownership and favorite junction repositories
//!
//! Both junctions are unique on the `(users_id, your_kahoot_id)` pair, and
//! both sides become null when the referenced user or kahoot is deleted.
//! Listings therefore include orphaned rows.

use crate::database::connection::ConnectionPool;
use crate::database::schema::tables;
use crate::models::kahoot::{FavoriteKahoot, KahootOwner};
use crate::utils::errors::{StoreError, StoreResult};
use crate::utils::logging::timed_operation;

#[derive(Clone, Debug)]
pub struct KahootOwnerRepository {
    pool: ConnectionPool,
}

impl KahootOwnerRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Record that a user owns a kahoot
    pub async fn create(&self, users_id: i32, your_kahoot_id: i32) -> StoreResult<KahootOwner> {
        timed_operation("create", tables::KAHOOT_OWNERS, async move {
            let mut conn = self.pool.acquire().await?;
            let owner = sqlx::query_as::<_, KahootOwner>(
                r#"
                INSERT INTO kahoot_owners (users_id, your_kahoot_id)
                VALUES ($1, $2)
                RETURNING id, users_id, your_kahoot_id
                "#,
            )
            .bind(users_id)
            .bind(your_kahoot_id)
            .fetch_one(&mut *conn)
            .await?;

            Ok(owner)
        })
        .await
    }

    pub async fn list(&self) -> StoreResult<Vec<KahootOwner>> {
        timed_operation("list", tables::KAHOOT_OWNERS, async move {
            let mut conn = self.pool.acquire().await?;
            let owners = sqlx::query_as::<_, KahootOwner>(
                "SELECT id, users_id, your_kahoot_id FROM kahoot_owners ORDER BY id",
            )
            .fetch_all(&mut *conn)
            .await?;

            Ok(owners)
        })
        .await
    }

    /// Ownership rows of one user
    pub async fn list_for_user(&self, users_id: i32) -> StoreResult<Vec<KahootOwner>> {
        timed_operation("list_for_user", tables::KAHOOT_OWNERS, async move {
            let mut conn = self.pool.acquire().await?;
            let owners = sqlx::query_as::<_, KahootOwner>(
                "SELECT id, users_id, your_kahoot_id FROM kahoot_owners WHERE users_id = $1 ORDER BY id",
            )
            .bind(users_id)
            .fetch_all(&mut *conn)
            .await?;

            Ok(owners)
        })
        .await
    }

    pub async fn delete(&self, id: i32) -> StoreResult<KahootOwner> {
        timed_operation("delete", tables::KAHOOT_OWNERS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, KahootOwner>(
                "DELETE FROM kahoot_owners WHERE id = $1 RETURNING id, users_id, your_kahoot_id",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::KAHOOT_OWNERS, id))
        })
        .await
    }
}

#[derive(Clone, Debug)]
pub struct FavoriteKahootRepository {
    pool: ConnectionPool,
}

impl FavoriteKahootRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Mark a kahoot as a favorite of a user
    pub async fn create(&self, users_id: i32, your_kahoot_id: i32) -> StoreResult<FavoriteKahoot> {
        timed_operation("create", tables::FAVORITE_KAHOOTS, async move {
            let mut conn = self.pool.acquire().await?;
            let favorite = sqlx::query_as::<_, FavoriteKahoot>(
                r#"
                INSERT INTO favorite_kahoots (users_id, your_kahoot_id)
                VALUES ($1, $2)
                RETURNING id, users_id, your_kahoot_id
                "#,
            )
            .bind(users_id)
            .bind(your_kahoot_id)
            .fetch_one(&mut *conn)
            .await?;

            Ok(favorite)
        })
        .await
    }

    pub async fn list(&self) -> StoreResult<Vec<FavoriteKahoot>> {
        timed_operation("list", tables::FAVORITE_KAHOOTS, async move {
            let mut conn = self.pool.acquire().await?;
            let favorites = sqlx::query_as::<_, FavoriteKahoot>(
                "SELECT id, users_id, your_kahoot_id FROM favorite_kahoots ORDER BY id",
            )
            .fetch_all(&mut *conn)
            .await?;

            Ok(favorites)
        })
        .await
    }

    /// Favorite rows of one user
    pub async fn list_for_user(&self, users_id: i32) -> StoreResult<Vec<FavoriteKahoot>> {
        timed_operation("list_for_user", tables::FAVORITE_KAHOOTS, async move {
            let mut conn = self.pool.acquire().await?;
            let favorites = sqlx::query_as::<_, FavoriteKahoot>(
                "SELECT id, users_id, your_kahoot_id FROM favorite_kahoots WHERE users_id = $1 ORDER BY id",
            )
            .bind(users_id)
            .fetch_all(&mut *conn)
            .await?;

            Ok(favorites)
        })
        .await
    }

    pub async fn delete(&self, id: i32) -> StoreResult<FavoriteKahoot> {
        timed_operation("delete", tables::FAVORITE_KAHOOTS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, FavoriteKahoot>(
                "DELETE FROM favorite_kahoots WHERE id = $1 RETURNING id, users_id, your_kahoot_id",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::FAVORITE_KAHOOTS, id))
        })
        .await
    }
}
