use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::question_controller::QuestionController;
use crate::dto::question_dto::{AnswerQuestionRequest, AskQuestionRequest, PublicQuestion};
use crate::dto::ApiResponse;
use crate::models::auth::Actor;
use crate::models::question::Question;
use crate::routes::today;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Formulario público de preguntas (con rate limit)
pub fn create_public_question_form_router() -> Router<AppState> {
    Router::new().route("/poser-question/", post(ask_question))
}

/// FAQ pública
pub fn create_faq_router() -> Router<AppState> {
    Router::new()
        .route("/faq/", get(public_feed))
        .route("/faq/:id/", get(public_question))
}

pub fn create_question_router() -> Router<AppState> {
    Router::new()
        .route("/questions/", get(list_questions))
        .route("/questions/:id/repondre/", post(answer_question))
}

async fn ask_question(
    State(state): State<AppState>,
    actor: Option<Extension<Actor>>,
    Json(request): Json<AskQuestionRequest>,
) -> Result<Json<ApiResponse<PublicQuestion>>, AppError> {
    let controller = QuestionController::new(&state);
    let actor = actor.map(|Extension(actor)| actor);
    let response = controller.ask(actor.as_ref(), request).await?;
    Ok(Json(response))
}

async fn public_feed(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PublicQuestion>>>, AppError> {
    let controller = QuestionController::new(&state);
    let response = controller.public_feed(today()).await?;
    Ok(Json(response))
}

async fn public_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PublicQuestion>>, AppError> {
    let controller = QuestionController::new(&state);
    let response = controller.public_question(id).await?;
    Ok(Json(response))
}

async fn list_questions(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ApiResponse<Vec<Question>>>, AppError> {
    let controller = QuestionController::new(&state);
    let response = controller.list(&actor).await?;
    Ok(Json(response))
}

async fn answer_question(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnswerQuestionRequest>,
) -> Result<Json<ApiResponse<Question>>, AppError> {
    let controller = QuestionController::new(&state);
    let response = controller.answer(&actor, id, request).await?;
    Ok(Json(response))
}
