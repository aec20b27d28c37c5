//! Repository de preguntas públicas en PostgreSQL
//!
//! La unicidad "una pendiente por email" la garantiza el índice parcial
//! `questions_one_pending_per_email`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::question::{NewQuestion, Question, QuestionStatus};
use crate::repositories::QuestionRepository;
use crate::utils::errors::{is_unique_violation, not_found_error, AppError, AppResult};

pub struct QuestionRepositoryPg {
    pool: PgPool,
}

impl QuestionRepositoryPg {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for QuestionRepositoryPg {
    async fn create_question(&self, question: NewQuestion) -> AppResult<Question> {
        sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (id, name, email, subject, message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&question.name)
        .bind(&question.email)
        .bind(&question.subject)
        .bind(&question.message)
        .bind(QuestionStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicatePending(format!(
                    "Une question est déjà en attente pour {}",
                    question.email
                ))
            } else {
                AppError::Database(e)
            }
        })
    }

    async fn find_question(&self, id: Uuid) -> AppResult<Option<Question>> {
        let question = sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(question)
    }

    async fn list_questions(&self) -> AppResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>("SELECT * FROM questions ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(questions)
    }

    async fn list_answered(&self) -> AppResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT * FROM questions WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(QuestionStatus::Answered)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn save_answer(&self, answered: &Question) -> AppResult<Question> {
        let saved = sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions
            SET reply = $2, status = $3, answered_at = $4
            WHERE id = $1 AND status = $5
            RETURNING *
            "#,
        )
        .bind(answered.id)
        .bind(&answered.reply)
        .bind(QuestionStatus::Answered)
        .bind(answered.answered_at)
        .bind(QuestionStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;

        match saved {
            Some(question) => Ok(question),
            None => match self.find_question(answered.id).await? {
                Some(_) => Err(AppError::Conflict(format!(
                    "La question {} a déjà reçu une réponse",
                    answered.id
                ))),
                None => Err(not_found_error("Question", &answered.id.to_string())),
            },
        }
    }
}
