use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::Question;
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct AskQuestionRequest {
    #[validate(custom = "validate_not_blank", length(max = 255))]
    pub name: String,
    #[validate(email(message = "Email invalide"))]
    pub email: String,
    #[validate(custom = "validate_not_blank", length(max = 255))]
    pub subject: String,
    #[validate(custom = "validate_not_blank", length(max = 5000))]
    pub message: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AnswerQuestionRequest {
    #[validate(custom = "validate_not_blank", length(max = 5000))]
    pub reply: String,
}

/// Pregunta tal como se muestra en la FAQ pública (sin email)
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: uuid::Uuid,
    pub name: String,
    pub subject: String,
    pub message: String,
    pub reply: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub answered_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Question> for PublicQuestion {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            name: question.name,
            subject: question.subject,
            message: question.message,
            reply: question.reply,
            created_at: question.created_at,
            answered_at: question.answered_at,
        }
    }
}
