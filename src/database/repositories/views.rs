//! Composite read queries across the junction tables
//!
//! Each user view is a left join rooted at `users`, so a user with nothing
//! joined still yields one row with null joined columns. Rows are ordered by
//! user id, then joined entity id, then junction id.

use sqlx::PgConnection;

use crate::database::connection::ConnectionPool;
use crate::database::schema::tables;
use crate::models::question::{KahootQuestion, PresentationSlide, TrueFalseQuestion, WrittenQuestion};
use crate::models::views::{UserGroupRow, UserKahootRow};
use crate::utils::errors::StoreResult;
use crate::utils::logging::timed_operation;

#[derive(Clone, Debug)]
pub struct ViewRepository {
    pool: ConnectionPool,
}

impl ViewRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Users paired with the kahoots they own
    pub async fn users_with_owned_kahoots(&self) -> StoreResult<Vec<UserKahootRow>> {
        timed_operation("users_with_owned_kahoots", tables::KAHOOT_OWNERS, async move {
            let mut conn = self.pool.acquire().await?;
            let rows = sqlx::query_as::<_, UserKahootRow>(
                r#"
                SELECT u.id AS user_id, u.username, k.id AS kahoot_id, k.title, k.is_private
                FROM users u
                LEFT JOIN kahoot_owners ko ON ko.users_id = u.id
                LEFT JOIN your_kahoot k ON k.id = ko.your_kahoot_id
                ORDER BY u.id, k.id, ko.id
                "#,
            )
            .fetch_all(&mut *conn)
            .await?;

            Ok(rows)
        })
        .await
    }

    /// Users paired with their favorite kahoots
    pub async fn users_with_favorite_kahoots(&self) -> StoreResult<Vec<UserKahootRow>> {
        timed_operation("users_with_favorite_kahoots", tables::FAVORITE_KAHOOTS, async move {
            let mut conn = self.pool.acquire().await?;
            let rows = sqlx::query_as::<_, UserKahootRow>(
                r#"
                SELECT u.id AS user_id, u.username, k.id AS kahoot_id, k.title, k.is_private
                FROM users u
                LEFT JOIN favorite_kahoots fk ON fk.users_id = u.id
                LEFT JOIN your_kahoot k ON k.id = fk.your_kahoot_id
                ORDER BY u.id, k.id, fk.id
                "#,
            )
            .fetch_all(&mut *conn)
            .await?;

            Ok(rows)
        })
        .await
    }

    /// Users paired with the groups they belong to
    pub async fn users_with_groups(&self) -> StoreResult<Vec<UserGroupRow>> {
        timed_operation("users_with_groups", tables::GROUP_MEMBERS, async move {
            let mut conn = self.pool.acquire().await?;
            let rows = sqlx::query_as::<_, UserGroupRow>(
                r#"
                SELECT u.id AS user_id, u.username,
                       g.id AS group_id, g.name AS group_name, g.description AS group_description
                FROM users u
                LEFT JOIN user_group_members ugm ON ugm.user_id = u.id
                LEFT JOIN groups g ON g.id = ugm.group_id
                ORDER BY u.id, g.id, ugm.id
                "#,
            )
            .fetch_all(&mut *conn)
            .await?;

            Ok(rows)
        })
        .await
    }

    /// Every question and slide of a kahoot as one tagged list
    ///
    /// Three independent statements on one connection: true/false questions,
    /// then written questions, then slides, each ordered by id. There is no
    /// snapshot across the three, so a concurrent write can show up in one
    /// part and not another. An unknown kahoot yields an empty list.
    pub async fn kahoot_questions(&self, kahoot_id: i32) -> StoreResult<Vec<KahootQuestion>> {
        timed_operation("kahoot_questions", tables::KAHOOTS, async move {
            let mut conn = self.pool.acquire().await?;
            collect_questions(&mut conn, kahoot_id).await
        })
        .await
    }
}

async fn collect_questions(conn: &mut PgConnection, kahoot_id: i32) -> StoreResult<Vec<KahootQuestion>> {
    let true_false = sqlx::query_as::<_, TrueFalseQuestion>(
        "SELECT id, question, answer, your_kahoot_id FROM quiz_with_true_false WHERE your_kahoot_id = $1 ORDER BY id",
    )
    .bind(kahoot_id)
    .fetch_all(&mut *conn)
    .await?;

    let written = sqlx::query_as::<_, WrittenQuestion>(
        "SELECT id, question, your_kahoot_id FROM quiz_with_written_answer WHERE your_kahoot_id = $1 ORDER BY id",
    )
    .bind(kahoot_id)
    .fetch_all(&mut *conn)
    .await?;

    let slides = sqlx::query_as::<_, PresentationSlide>(
        "SELECT id, title, text, your_kahoot_id FROM presentation_classic WHERE your_kahoot_id = $1 ORDER BY id",
    )
    .bind(kahoot_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut questions = Vec::with_capacity(true_false.len() + written.len() + slides.len());
    questions.extend(true_false.into_iter().map(KahootQuestion::from));
    questions.extend(written.into_iter().map(KahootQuestion::from));
    questions.extend(slides.into_iter().map(KahootQuestion::from));
    Ok(questions)
}
