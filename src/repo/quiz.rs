// src/repo/quiz.rs
//
// Adapter over the quizzes/questions/results tables. Single-query
// operations take any executor so they run against the pool or inside a
// caller-held transaction; multi-step inserts take a connection so all
// writes land in one transaction and later reads observe them.

use sqlx::{PgConnection, PgExecutor, Postgres, QueryBuilder};

use crate::grading::GradeOutcome;
use crate::models::{
    pagination::Pagination,
    question::Question,
    quiz::{CreateQuizRequest, Quiz, QuizDetail, UpdateQuizRequest},
    result::QuizResult,
};

const QUIZ_COLUMNS: &str = "id, user_id, name, quiz_number, duration, pin, created_at";

const QUESTION_COLUMNS: &str =
    "id, quiz_id, prompt, option_a, option_b, option_c, option_d, correct_option";

/// Ownership filter shared by the count and page queries, so the two can
/// never disagree. `NULL` means "no filter" (admin caller).
const OWNERSHIP_FILTER: &str = "($1::BIGINT IS NULL OR user_id = $1)";

pub async fn find_by_id(
    executor: impl PgExecutor<'_>,
    quiz_id: i64,
) -> Result<Option<Quiz>, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(&format!(
        "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = $1"
    ))
    .bind(quiz_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_questions(
    executor: impl PgExecutor<'_>,
    quiz_id: i64,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {QUESTION_COLUMNS} FROM questions WHERE quiz_id = $1 ORDER BY id"
    ))
    .bind(quiz_id)
    .fetch_all(executor)
    .await
}

pub async fn count(
    executor: impl PgExecutor<'_>,
    owner: Option<i64>,
) -> Result<i64, sqlx::Error> {
    let (total,): (i64,) =
        sqlx::query_as(&format!("SELECT COUNT(*) FROM quizzes WHERE {OWNERSHIP_FILTER}"))
            .bind(owner)
            .fetch_one(executor)
            .await?;
    Ok(total)
}

pub async fn list(
    executor: impl PgExecutor<'_>,
    owner: Option<i64>,
    pagination: &Pagination,
) -> Result<Vec<Quiz>, sqlx::Error> {
    sqlx::query_as::<_, Quiz>(&format!(
        "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE {OWNERSHIP_FILTER} \
         ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
    ))
    .bind(owner)
    .bind(pagination.limit)
    .bind(pagination.offset())
    .fetch_all(executor)
    .await
}

/// Inserts a quiz and its questions. Runs on the caller's transaction
/// connection; a failing question insert aborts the whole creation.
pub async fn insert(
    conn: &mut PgConnection,
    user_id: i64,
    data: &CreateQuizRequest,
) -> Result<QuizDetail, sqlx::Error> {
    let quiz = sqlx::query_as::<_, Quiz>(&format!(
        "INSERT INTO quizzes (user_id, name, quiz_number, duration, pin) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {QUIZ_COLUMNS}"
    ))
    .bind(user_id)
    .bind(&data.name)
    .bind(data.quiz_number)
    .bind(data.duration)
    .bind(&data.pin)
    .fetch_one(&mut *conn)
    .await?;

    let mut questions = Vec::with_capacity(data.questions.len());
    for question in &data.questions {
        let row = sqlx::query_as::<_, Question>(&format!(
            "INSERT INTO questions \
             (quiz_id, prompt, option_a, option_b, option_c, option_d, correct_option) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {QUESTION_COLUMNS}"
        ))
        .bind(quiz.id)
        .bind(&question.prompt)
        .bind(&question.option_a)
        .bind(&question.option_b)
        .bind(&question.option_c)
        .bind(&question.option_d)
        .bind(question.correct_option.to_ascii_uppercase())
        .fetch_one(&mut *conn)
        .await?;
        questions.push(row);
    }

    Ok(QuizDetail { quiz, questions })
}

/// Applies only the fields present in the payload. Returns the updated row,
/// or None when the quiz vanished between the ownership check and the write
/// (accepted race, reported as not found).
pub async fn apply_partial_update(
    executor: impl PgExecutor<'_>,
    quiz_id: i64,
    data: &UpdateQuizRequest,
) -> Result<Option<Quiz>, sqlx::Error> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE quizzes SET ");
    let mut separated = builder.separated(", ");

    if let Some(name) = &data.name {
        separated.push("name = ");
        separated.push_bind_unseparated(name.clone());
    }

    if let Some(quiz_number) = data.quiz_number {
        separated.push("quiz_number = ");
        separated.push_bind_unseparated(quiz_number);
    }

    if let Some(duration) = data.duration {
        separated.push("duration = ");
        separated.push_bind_unseparated(duration);
    }

    if let Some(pin) = &data.pin {
        separated.push("pin = ");
        separated.push_bind_unseparated(pin.clone());
    }

    builder.push(" WHERE id = ");
    builder.push_bind(quiz_id);
    builder.push(&format!(" RETURNING {QUIZ_COLUMNS}"));

    builder
        .build_query_as::<Quiz>()
        .fetch_optional(executor)
        .await
}

/// Deletes a quiz; questions cascade at the schema level.
/// Returns the number of rows removed.
pub async fn delete(executor: impl PgExecutor<'_>, quiz_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
        .bind(quiz_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Persists one graded attempt. Results are append-only.
pub async fn insert_result(
    executor: impl PgExecutor<'_>,
    user_id: i64,
    quiz_id: i64,
    outcome: &GradeOutcome,
) -> Result<QuizResult, sqlx::Error> {
    sqlx::query_as::<_, QuizResult>(
        "INSERT INTO results \
         (user_id, quiz_id, correct_answers, incorrect_answers, total_questions, \
          score_percentage, grade) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING id, user_id, quiz_id, correct_answers, incorrect_answers, \
                   total_questions, score_percentage, grade, created_at",
    )
    .bind(user_id)
    .bind(quiz_id)
    .bind(outcome.correct_answers)
    .bind(outcome.incorrect_answers)
    .bind(outcome.total_questions)
    .bind(outcome.score_percentage)
    .bind(outcome.grade)
    .fetch_one(executor)
    .await
}
