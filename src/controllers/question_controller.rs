//! Controller del canal público de preguntas

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::question_dto::{AnswerQuestionRequest, AskQuestionRequest, PublicQuestion};
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::question::{NewQuestion, Question, QuestionStatus};
use crate::repositories::Repositories;
use crate::services::authorization_service::{authorize, Action};
use crate::services::{question_service, sitemap_service};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct QuestionController {
    repos: Repositories,
    public_base_url: String,
}

impl QuestionController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            public_base_url: state.config.public_base_url.clone(),
        }
    }

    pub async fn ask(
        &self,
        actor: Option<&Actor>,
        request: AskQuestionRequest,
    ) -> AppResult<ApiResponse<PublicQuestion>> {
        authorize(actor, Action::AskQuestion)?;
        request.validate()?;

        let question = self
            .repos
            .questions
            .create_question(NewQuestion {
                name: request.name.trim().to_string(),
                email: question_service::normalize_email(&request.email),
                subject: request.subject.trim().to_string(),
                message: request.message.trim().to_string(),
            })
            .await?;
        info!("❓ Nueva pregunta {} recibida", question.id);

        Ok(ApiResponse::success_with_message(
            question.into(),
            "Votre question a été envoyée",
        ))
    }

    pub async fn list(&self, actor: &Actor) -> AppResult<ApiResponse<Vec<Question>>> {
        authorize(Some(actor), Action::ManageQuestions)?;
        Ok(ApiResponse::success(self.repos.questions.list_questions().await?))
    }

    pub async fn answer(
        &self,
        actor: &Actor,
        id: Uuid,
        request: AnswerQuestionRequest,
    ) -> AppResult<ApiResponse<Question>> {
        authorize(Some(actor), Action::ManageQuestions)?;
        request.validate()?;

        let question = self
            .repos
            .questions
            .find_question(id)
            .await?
            .ok_or_else(|| not_found_error("Question", &id.to_string()))?;
        let answered = question_service::answer(&question, &request.reply, Utc::now())?;
        let saved = self.repos.questions.save_answer(&answered).await?;
        info!("💬 Pregunta {} respondida", id);

        Ok(ApiResponse::success_with_message(saved, "Réponse publiée"))
    }

    /// FAQ pública, estable durante cada ventana de 2 días
    pub async fn public_feed(&self, today: NaiveDate) -> AppResult<ApiResponse<Vec<PublicQuestion>>> {
        authorize(None, Action::ViewPublicFeed)?;

        let answered = self.repos.questions.list_answered().await?;
        let feed = question_service::public_feed(answered, today);
        Ok(ApiResponse::success(feed.into_iter().map(Into::into).collect()))
    }

    pub async fn public_question(&self, id: Uuid) -> AppResult<ApiResponse<PublicQuestion>> {
        authorize(None, Action::ViewPublicFeed)?;

        let question = self
            .repos
            .questions
            .find_question(id)
            .await?
            .filter(|q| q.status == QuestionStatus::Answered)
            .ok_or_else(|| not_found_error("Question", &id.to_string()))?;
        Ok(ApiResponse::success(question.into()))
    }

    pub async fn sitemap(&self) -> AppResult<String> {
        let answered = self.repos.questions.list_answered().await?;
        Ok(sitemap_service::render_sitemap(&self.public_base_url, &answered))
    }
}
