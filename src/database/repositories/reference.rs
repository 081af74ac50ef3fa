//! Lookup-table repository implementation
//!
//! Subscriptions, languages and customer types share one shape (`id`,
//! `name`), so a single generic repository serves all three. Names are not
//! unique; creating the same name twice yields two rows.

use std::marker::PhantomData;

use crate::database::connection::ConnectionPool;
use crate::models::reference::{CustomerType, Language, ReferenceEntity, Subscription};
use crate::utils::errors::{StoreError, StoreResult};
use crate::utils::logging::timed_operation;

pub type SubscriptionRepository = ReferenceRepository<Subscription>;
pub type LanguageRepository = ReferenceRepository<Language>;
pub type CustomerTypeRepository = ReferenceRepository<CustomerType>;

#[derive(Debug)]
pub struct ReferenceRepository<T> {
    pool: ConnectionPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T: ReferenceEntity> Clone for ReferenceRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<T: ReferenceEntity> ReferenceRepository<T> {
    pub fn new(pool: ConnectionPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// Insert a name
    pub async fn create(&self, name: &str) -> StoreResult<T> {
        let sql = format!("INSERT INTO {} (name) VALUES ($1) RETURNING id, name", T::TABLE);
        timed_operation("create", T::TABLE, async move {
            let mut conn = self.pool.acquire().await?;
            let row = sqlx::query_as::<_, T>(&sql)
                .bind(name)
                .fetch_one(&mut *conn)
                .await?;
            Ok(row)
        })
        .await
    }

    /// All rows ordered by id
    pub async fn list(&self) -> StoreResult<Vec<T>> {
        let sql = format!("SELECT id, name FROM {} ORDER BY id", T::TABLE);
        timed_operation("list", T::TABLE, async move {
            let mut conn = self.pool.acquire().await?;
            let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&mut *conn).await?;
            Ok(rows)
        })
        .await
    }

    pub async fn get(&self, id: i32) -> StoreResult<T> {
        let sql = format!("SELECT id, name FROM {} WHERE id = $1", T::TABLE);
        timed_operation("get", T::TABLE, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, T>(&sql)
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?
                .ok_or_else(|| StoreError::not_found(T::TABLE, id))
        })
        .await
    }

    /// Replace the name of an existing row
    pub async fn rename(&self, id: i32, name: &str) -> StoreResult<T> {
        let sql = format!(
            "UPDATE {} SET name = $2 WHERE id = $1 RETURNING id, name",
            T::TABLE
        );
        timed_operation("update", T::TABLE, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, T>(&sql)
                .bind(id)
                .bind(name)
                .fetch_optional(&mut *conn)
                .await?
                .ok_or_else(|| StoreError::not_found(T::TABLE, id))
        })
        .await
    }

    /// Delete a row. Fails with a reference violation while users or
    /// kahoots still point at it.
    pub async fn delete(&self, id: i32) -> StoreResult<T> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING id, name", T::TABLE);
        timed_operation("delete", T::TABLE, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, T>(&sql)
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?
                .ok_or_else(|| StoreError::not_found(T::TABLE, id))
        })
        .await
    }

    /// Longest name the column accepts
    pub fn max_name_len(&self) -> usize {
        T::MAX_NAME_LEN
    }
}
