//! Kahoot repository implementation

use crate::database::connection::ConnectionPool;
use crate::database::schema::tables;
use crate::models::kahoot::{CreateKahootRequest, Kahoot, KahootSummary, UpdateKahootRequest};
use crate::utils::errors::{StoreError, StoreResult};
use crate::utils::logging::timed_operation;

#[derive(Clone, Debug)]
pub struct KahootRepository {
    pool: ConnectionPool,
}

impl KahootRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Create a new kahoot in an existing language
    pub async fn create(&self, request: CreateKahootRequest) -> StoreResult<KahootSummary> {
        timed_operation("create", tables::KAHOOTS, async move {
            let mut conn = self.pool.acquire().await?;
            let kahoot = sqlx::query_as::<_, KahootSummary>(
                r#"
                INSERT INTO your_kahoot (title, language_id, description, is_private)
                VALUES ($1, $2, $3, $4)
                RETURNING id, title
                "#,
            )
            .bind(request.title)
            .bind(request.language_id)
            .bind(request.description)
            .bind(request.is_private)
            .fetch_one(&mut *conn)
            .await?;

            Ok(kahoot)
        })
        .await
    }

    pub async fn get(&self, id: i32) -> StoreResult<Kahoot> {
        timed_operation("get", tables::KAHOOTS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, Kahoot>(
                "SELECT id, title, description, is_private, language_id FROM your_kahoot WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::KAHOOTS, id))
        })
        .await
    }

    pub async fn list(&self) -> StoreResult<Vec<Kahoot>> {
        timed_operation("list", tables::KAHOOTS, async move {
            let mut conn = self.pool.acquire().await?;
            let kahoots = sqlx::query_as::<_, Kahoot>(
                "SELECT id, title, description, is_private, language_id FROM your_kahoot ORDER BY id",
            )
            .fetch_all(&mut *conn)
            .await?;

            Ok(kahoots)
        })
        .await
    }

    /// Replace title, description, visibility and language
    pub async fn update(&self, id: i32, request: UpdateKahootRequest) -> StoreResult<Kahoot> {
        timed_operation("update", tables::KAHOOTS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, Kahoot>(
                r#"
                UPDATE your_kahoot
                SET title = $2,
                    description = $3,
                    is_private = $4,
                    language_id = $5
                WHERE id = $1
                RETURNING id, title, description, is_private, language_id
                "#,
            )
            .bind(id)
            .bind(request.title)
            .bind(request.description)
            .bind(request.is_private)
            .bind(request.language_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::KAHOOTS, id))
        })
        .await
    }

    /// Delete a kahoot. Its questions, slides, ownerships and favorites keep
    /// existing with a null kahoot reference.
    pub async fn delete(&self, id: i32) -> StoreResult<Kahoot> {
        timed_operation("delete", tables::KAHOOTS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, Kahoot>(
                r#"
                DELETE FROM your_kahoot
                WHERE id = $1
                RETURNING id, title, description, is_private, language_id
                "#,
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::KAHOOTS, id))
        })
        .await
    }

    pub async fn count(&self) -> StoreResult<i64> {
        timed_operation("count", tables::KAHOOTS, async move {
            let mut conn = self.pool.acquire().await?;
            let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM your_kahoot")
                .fetch_one(&mut *conn)
                .await?;

            Ok(count.0)
        })
        .await
    }
}
