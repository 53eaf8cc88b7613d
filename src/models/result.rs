// src/models/result.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'results' table in the database.
/// One row per quiz attempt, created at end-of-quiz. Append-only: results
/// are never updated or deleted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: i64,
    pub user_id: i64,
    pub quiz_id: i64,
    pub correct_answers: i32,
    pub incorrect_answers: i32,
    pub total_questions: i32,
    pub score_percentage: f64,
    pub grade: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One submitted answer: the question it targets and the stable option
/// identifier ("A".."D") the participant picked.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: i64,
    pub option: String,
}

/// DTO for ending a quiz attempt.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub quiz_id: i64,
    pub answers: Vec<SubmittedAnswer>,
}

/// Score summary returned to the participant.
#[derive(Debug, Serialize)]
pub struct QuizResultResponse {
    pub quiz_id: i64,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub incorrect_answers: i32,
    /// Rounded to two decimal places for presentation.
    pub score_percentage: f64,
    pub grade: String,
}
