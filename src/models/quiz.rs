// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::models::question::{CreateQuestionRequest, Question, QuestionView};

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,

    /// Owning user. Non-admin access is filtered by this column.
    pub user_id: i64,

    pub name: String,

    pub quiz_number: i32,

    /// Duration in minutes.
    pub duration: i32,

    /// Shared secret a participant must present to start the quiz.
    pub pin: String,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Quiz record together with its questions, as returned on creation.
#[derive(Debug, Serialize)]
pub struct QuizDetail {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<Question>,
}

/// DTO for creating a quiz. Questions are created together with the quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 1))]
    pub quiz_number: i32,
    #[validate(range(min = 1, max = 600))]
    pub duration: i32,
    #[validate(length(min = 4, max = 32))]
    pub pin: String,
    #[validate(nested)]
    #[serde(default)]
    pub questions: Vec<CreateQuestionRequest>,
}

/// DTO for updating a quiz. Fields are optional; only present fields are
/// applied.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub quiz_number: Option<i32>,
    #[validate(range(min = 1, max = 600))]
    pub duration: Option<i32>,
    #[validate(length(min = 4, max = 32))]
    pub pin: Option<String>,
}

impl UpdateQuizRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quiz_number.is_none()
            && self.duration.is_none()
            && self.pin.is_none()
    }
}

/// DTO for starting a quiz attempt.
#[derive(Debug, Deserialize)]
pub struct StartQuizRequest {
    pub pin: String,
}

/// Quiz metadata plus participant-facing questions, returned when a quiz
/// is started. The PIN is never echoed back.
#[derive(Debug, Serialize)]
pub struct StartQuizResponse {
    pub quiz_id: i64,
    pub quiz_name: String,
    pub quiz_number: i32,
    pub duration: i32,
    pub total_questions: usize,
    pub questions: Vec<QuestionView>,
}
