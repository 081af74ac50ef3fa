//! Quiz content repositories
//!
//! Written questions, their answers, true/false questions and presentation
//! slides. Each row points at its parent with a nullable reference; creating
//! content for a parent that does not exist is a reference violation.

use crate::database::connection::ConnectionPool;
use crate::database::schema::tables;
use crate::models::question::{
    PresentationSlide, PresentationSlideRequest, TrueFalseQuestion, TrueFalseQuestionRequest,
    WrittenAnswer, WrittenAnswerRequest, WrittenQuestion, WrittenQuestionRequest,
};
use crate::utils::errors::{StoreError, StoreResult};
use crate::utils::logging::timed_operation;

#[derive(Clone, Debug)]
pub struct WrittenQuestionRepository {
    pool: ConnectionPool,
}

impl WrittenQuestionRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: WrittenQuestionRequest) -> StoreResult<WrittenQuestion> {
        timed_operation("create", tables::WRITTEN_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            let question = sqlx::query_as::<_, WrittenQuestion>(
                r#"
                INSERT INTO quiz_with_written_answer (question, your_kahoot_id)
                VALUES ($1, $2)
                RETURNING id, question, your_kahoot_id
                "#,
            )
            .bind(request.question)
            .bind(request.your_kahoot_id)
            .fetch_one(&mut *conn)
            .await?;

            Ok(question)
        })
        .await
    }

    pub async fn get(&self, id: i32) -> StoreResult<WrittenQuestion> {
        timed_operation("get", tables::WRITTEN_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, WrittenQuestion>(
                "SELECT id, question, your_kahoot_id FROM quiz_with_written_answer WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::WRITTEN_QUESTIONS, id))
        })
        .await
    }

    pub async fn list(&self) -> StoreResult<Vec<WrittenQuestion>> {
        timed_operation("list", tables::WRITTEN_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            let questions = sqlx::query_as::<_, WrittenQuestion>(
                "SELECT id, question, your_kahoot_id FROM quiz_with_written_answer ORDER BY id",
            )
            .fetch_all(&mut *conn)
            .await?;

            Ok(questions)
        })
        .await
    }

    /// Written questions of one kahoot
    pub async fn list_for_kahoot(&self, kahoot_id: i32) -> StoreResult<Vec<WrittenQuestion>> {
        timed_operation("list_for_kahoot", tables::WRITTEN_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            let questions = sqlx::query_as::<_, WrittenQuestion>(
                r#"
                SELECT id, question, your_kahoot_id
                FROM quiz_with_written_answer
                WHERE your_kahoot_id = $1
                ORDER BY id
                "#,
            )
            .bind(kahoot_id)
            .fetch_all(&mut *conn)
            .await?;

            Ok(questions)
        })
        .await
    }

    pub async fn update(&self, id: i32, request: WrittenQuestionRequest) -> StoreResult<WrittenQuestion> {
        timed_operation("update", tables::WRITTEN_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, WrittenQuestion>(
                r#"
                UPDATE quiz_with_written_answer
                SET question = $2,
                    your_kahoot_id = $3
                WHERE id = $1
                RETURNING id, question, your_kahoot_id
                "#,
            )
            .bind(id)
            .bind(request.question)
            .bind(request.your_kahoot_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::WRITTEN_QUESTIONS, id))
        })
        .await
    }

    /// Delete a written question. Its answers stay with a null question
    /// reference.
    pub async fn delete(&self, id: i32) -> StoreResult<WrittenQuestion> {
        timed_operation("delete", tables::WRITTEN_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, WrittenQuestion>(
                "DELETE FROM quiz_with_written_answer WHERE id = $1 RETURNING id, question, your_kahoot_id",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::WRITTEN_QUESTIONS, id))
        })
        .await
    }
}

#[derive(Clone, Debug)]
pub struct WrittenAnswerRepository {
    pool: ConnectionPool,
}

impl WrittenAnswerRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: WrittenAnswerRequest) -> StoreResult<WrittenAnswer> {
        timed_operation("create", tables::WRITTEN_ANSWERS, async move {
            let mut conn = self.pool.acquire().await?;
            let answer = sqlx::query_as::<_, WrittenAnswer>(
                r#"
                INSERT INTO quiz_written_answer (answer, quiz_with_written_answer_id)
                VALUES ($1, $2)
                RETURNING id, answer, quiz_with_written_answer_id
                "#,
            )
            .bind(request.answer)
            .bind(request.quiz_with_written_answer_id)
            .fetch_one(&mut *conn)
            .await?;

            Ok(answer)
        })
        .await
    }

    pub async fn get(&self, id: i32) -> StoreResult<WrittenAnswer> {
        timed_operation("get", tables::WRITTEN_ANSWERS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, WrittenAnswer>(
                "SELECT id, answer, quiz_with_written_answer_id FROM quiz_written_answer WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::WRITTEN_ANSWERS, id))
        })
        .await
    }

    pub async fn list(&self) -> StoreResult<Vec<WrittenAnswer>> {
        timed_operation("list", tables::WRITTEN_ANSWERS, async move {
            let mut conn = self.pool.acquire().await?;
            let answers = sqlx::query_as::<_, WrittenAnswer>(
                "SELECT id, answer, quiz_with_written_answer_id FROM quiz_written_answer ORDER BY id",
            )
            .fetch_all(&mut *conn)
            .await?;

            Ok(answers)
        })
        .await
    }

    /// Accepted answers of one written question
    pub async fn list_for_question(&self, question_id: i32) -> StoreResult<Vec<WrittenAnswer>> {
        timed_operation("list_for_question", tables::WRITTEN_ANSWERS, async move {
            let mut conn = self.pool.acquire().await?;
            let answers = sqlx::query_as::<_, WrittenAnswer>(
                r#"
                SELECT id, answer, quiz_with_written_answer_id
                FROM quiz_written_answer
                WHERE quiz_with_written_answer_id = $1
                ORDER BY id
                "#,
            )
            .bind(question_id)
            .fetch_all(&mut *conn)
            .await?;

            Ok(answers)
        })
        .await
    }

    pub async fn update(&self, id: i32, request: WrittenAnswerRequest) -> StoreResult<WrittenAnswer> {
        timed_operation("update", tables::WRITTEN_ANSWERS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, WrittenAnswer>(
                r#"
                UPDATE quiz_written_answer
                SET answer = $2,
                    quiz_with_written_answer_id = $3
                WHERE id = $1
                RETURNING id, answer, quiz_with_written_answer_id
                "#,
            )
            .bind(id)
            .bind(request.answer)
            .bind(request.quiz_with_written_answer_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::WRITTEN_ANSWERS, id))
        })
        .await
    }

    pub async fn delete(&self, id: i32) -> StoreResult<WrittenAnswer> {
        timed_operation("delete", tables::WRITTEN_ANSWERS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, WrittenAnswer>(
                "DELETE FROM quiz_written_answer WHERE id = $1 RETURNING id, answer, quiz_with_written_answer_id",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::WRITTEN_ANSWERS, id))
        })
        .await
    }
}

#[derive(Clone, Debug)]
pub struct TrueFalseRepository {
    pool: ConnectionPool,
}

impl TrueFalseRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: TrueFalseQuestionRequest) -> StoreResult<TrueFalseQuestion> {
        timed_operation("create", tables::TRUE_FALSE_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            let question = sqlx::query_as::<_, TrueFalseQuestion>(
                r#"
                INSERT INTO quiz_with_true_false (question, answer, your_kahoot_id)
                VALUES ($1, $2, $3)
                RETURNING id, question, answer, your_kahoot_id
                "#,
            )
            .bind(request.question)
            .bind(request.answer)
            .bind(request.your_kahoot_id)
            .fetch_one(&mut *conn)
            .await?;

            Ok(question)
        })
        .await
    }

    pub async fn get(&self, id: i32) -> StoreResult<TrueFalseQuestion> {
        timed_operation("get", tables::TRUE_FALSE_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, TrueFalseQuestion>(
                "SELECT id, question, answer, your_kahoot_id FROM quiz_with_true_false WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::TRUE_FALSE_QUESTIONS, id))
        })
        .await
    }

    pub async fn list(&self) -> StoreResult<Vec<TrueFalseQuestion>> {
        timed_operation("list", tables::TRUE_FALSE_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            let questions = sqlx::query_as::<_, TrueFalseQuestion>(
                "SELECT id, question, answer, your_kahoot_id FROM quiz_with_true_false ORDER BY id",
            )
            .fetch_all(&mut *conn)
            .await?;

            Ok(questions)
        })
        .await
    }

    pub async fn list_for_kahoot(&self, kahoot_id: i32) -> StoreResult<Vec<TrueFalseQuestion>> {
        timed_operation("list_for_kahoot", tables::TRUE_FALSE_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            let questions = sqlx::query_as::<_, TrueFalseQuestion>(
                r#"
                SELECT id, question, answer, your_kahoot_id
                FROM quiz_with_true_false
                WHERE your_kahoot_id = $1
                ORDER BY id
                "#,
            )
            .bind(kahoot_id)
            .fetch_all(&mut *conn)
            .await?;

            Ok(questions)
        })
        .await
    }

    pub async fn update(
        &self,
        id: i32,
        request: TrueFalseQuestionRequest,
    ) -> StoreResult<TrueFalseQuestion> {
        timed_operation("update", tables::TRUE_FALSE_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, TrueFalseQuestion>(
                r#"
                UPDATE quiz_with_true_false
                SET question = $2,
                    answer = $3,
                    your_kahoot_id = $4
                WHERE id = $1
                RETURNING id, question, answer, your_kahoot_id
                "#,
            )
            .bind(id)
            .bind(request.question)
            .bind(request.answer)
            .bind(request.your_kahoot_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::TRUE_FALSE_QUESTIONS, id))
        })
        .await
    }

    /// Replace only the question text, leaving answer and kahoot untouched
    pub async fn patch_question(&self, id: i32, question: &str) -> StoreResult<TrueFalseQuestion> {
        timed_operation("patch", tables::TRUE_FALSE_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, TrueFalseQuestion>(
                r#"
                UPDATE quiz_with_true_false
                SET question = $2
                WHERE id = $1
                RETURNING id, question, answer, your_kahoot_id
                "#,
            )
            .bind(id)
            .bind(question)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::TRUE_FALSE_QUESTIONS, id))
        })
        .await
    }

    pub async fn delete(&self, id: i32) -> StoreResult<TrueFalseQuestion> {
        timed_operation("delete", tables::TRUE_FALSE_QUESTIONS, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, TrueFalseQuestion>(
                "DELETE FROM quiz_with_true_false WHERE id = $1 RETURNING id, question, answer, your_kahoot_id",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::TRUE_FALSE_QUESTIONS, id))
        })
        .await
    }
}

#[derive(Clone, Debug)]
pub struct SlideRepository {
    pool: ConnectionPool,
}

impl SlideRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: PresentationSlideRequest) -> StoreResult<PresentationSlide> {
        timed_operation("create", tables::SLIDES, async move {
            let mut conn = self.pool.acquire().await?;
            let slide = sqlx::query_as::<_, PresentationSlide>(
                r#"
                INSERT INTO presentation_classic (your_kahoot_id, title, text)
                VALUES ($1, $2, $3)
                RETURNING id, title, text, your_kahoot_id
                "#,
            )
            .bind(request.your_kahoot_id)
            .bind(request.title)
            .bind(request.text)
            .fetch_one(&mut *conn)
            .await?;

            Ok(slide)
        })
        .await
    }

    pub async fn get(&self, id: i32) -> StoreResult<PresentationSlide> {
        timed_operation("get", tables::SLIDES, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, PresentationSlide>(
                "SELECT id, title, text, your_kahoot_id FROM presentation_classic WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::SLIDES, id))
        })
        .await
    }

    pub async fn list(&self) -> StoreResult<Vec<PresentationSlide>> {
        timed_operation("list", tables::SLIDES, async move {
            let mut conn = self.pool.acquire().await?;
            let slides = sqlx::query_as::<_, PresentationSlide>(
                "SELECT id, title, text, your_kahoot_id FROM presentation_classic ORDER BY id",
            )
            .fetch_all(&mut *conn)
            .await?;

            Ok(slides)
        })
        .await
    }

    pub async fn list_for_kahoot(&self, kahoot_id: i32) -> StoreResult<Vec<PresentationSlide>> {
        timed_operation("list_for_kahoot", tables::SLIDES, async move {
            let mut conn = self.pool.acquire().await?;
            let slides = sqlx::query_as::<_, PresentationSlide>(
                r#"
                SELECT id, title, text, your_kahoot_id
                FROM presentation_classic
                WHERE your_kahoot_id = $1
                ORDER BY id
                "#,
            )
            .bind(kahoot_id)
            .fetch_all(&mut *conn)
            .await?;

            Ok(slides)
        })
        .await
    }

    pub async fn update(
        &self,
        id: i32,
        request: PresentationSlideRequest,
    ) -> StoreResult<PresentationSlide> {
        timed_operation("update", tables::SLIDES, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, PresentationSlide>(
                r#"
                UPDATE presentation_classic
                SET your_kahoot_id = $2,
                    title = $3,
                    text = $4
                WHERE id = $1
                RETURNING id, title, text, your_kahoot_id
                "#,
            )
            .bind(id)
            .bind(request.your_kahoot_id)
            .bind(request.title)
            .bind(request.text)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::SLIDES, id))
        })
        .await
    }

    pub async fn delete(&self, id: i32) -> StoreResult<PresentationSlide> {
        timed_operation("delete", tables::SLIDES, async move {
            let mut conn = self.pool.acquire().await?;
            sqlx::query_as::<_, PresentationSlide>(
                "DELETE FROM presentation_classic WHERE id = $1 RETURNING id, title, text, your_kahoot_id",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| StoreError::not_found(tables::SLIDES, id))
        })
        .await
    }
}
