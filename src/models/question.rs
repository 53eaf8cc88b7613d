// src/models/question.rs

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Stable option identifiers. Grading is keyed by these, never by the
/// position an option happens to occupy after shuffling.
pub const OPTION_IDS: [&str; 4] = ["A", "B", "C", "D"];

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// Parent quiz. A question belongs exclusively to one quiz.
    pub quiz_id: i64,

    /// The text content of the question.
    pub prompt: String,

    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,

    /// Which option is correct: "A", "B", "C" or "D".
    /// Configurable per question, not a fixed slot.
    pub correct_option: String,
}

/// A single option as presented to a participant.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionOption {
    /// Stable identifier ("A".."D"). Survives shuffling.
    pub id: String,
    pub text: String,
}

/// DTO for presenting a question to a participant. Excludes the correct
/// option; display order of options is randomized per reveal.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub id: i64,
    pub prompt: String,
    pub options: Vec<QuestionOption>,
}

impl Question {
    fn options(&self) -> Vec<QuestionOption> {
        vec![
            QuestionOption {
                id: "A".to_string(),
                text: self.option_a.clone(),
            },
            QuestionOption {
                id: "B".to_string(),
                text: self.option_b.clone(),
            },
            QuestionOption {
                id: "C".to_string(),
                text: self.option_c.clone(),
            },
            QuestionOption {
                id: "D".to_string(),
                text: self.option_d.clone(),
            },
        ]
    }

    /// Builds the participant-facing view with options in randomized
    /// display order. The correct-option identity is untouched: grading
    /// resolves by option id, so shuffling can never desynchronize it.
    pub fn to_view(&self) -> QuestionView {
        let mut options = self.options();
        options.shuffle(&mut rand::thread_rng());

        QuestionView {
            id: self.id,
            prompt: self.prompt.clone(),
            options,
        }
    }
}

/// DTO for creating a question under a quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub prompt: String,
    #[validate(length(min = 1, max = 500))]
    pub option_a: String,
    #[validate(length(min = 1, max = 500))]
    pub option_b: String,
    #[validate(length(min = 1, max = 500))]
    pub option_c: String,
    #[validate(length(min = 1, max = 500))]
    pub option_d: String,
    #[validate(custom(function = validate_correct_option))]
    pub correct_option: String,
}

fn validate_correct_option(value: &str) -> Result<(), validator::ValidationError> {
    if OPTION_IDS
        .iter()
        .any(|id| id.eq_ignore_ascii_case(value))
    {
        Ok(())
    } else {
        Err(validator::ValidationError::new("correct_option_invalid"))
    }
}
