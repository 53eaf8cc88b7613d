// src/services/quiz.rs
//
// Quiz lifecycle: create -> (start: questions revealed, options shuffled)
// -> (end: graded, result persisted). The quiz row itself is never mutated
// by start/end, so a quiz can be started and ended repeatedly.

use sqlx::PgPool;

use crate::{
    authz::{Identity, RoleName, can_access},
    error::{AppError, is_constraint_violation},
    grading,
    models::{
        pagination::{Paginated, Pagination},
        quiz::{CreateQuizRequest, Quiz, QuizDetail, StartQuizResponse, UpdateQuizRequest},
        result::{QuizResultResponse, SubmitQuizRequest},
    },
    repo,
};

fn quiz_not_found(quiz_id: i64) -> AppError {
    AppError::NotFound(format!("Quiz with id {} not found", quiz_id))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Creates a quiz (and its questions) owned by the calling user.
/// Constraint violations surface as 409.
pub async fn create_quiz(
    pool: &PgPool,
    user_id: i64,
    data: CreateQuizRequest,
) -> Result<QuizDetail, AppError> {
    tracing::info!("Creating quiz '{}' for user {}", data.name, user_id);

    let mut tx = pool.begin().await?;
    let detail = repo::quiz::insert(&mut tx, user_id, &data)
        .await
        .map_err(|e| {
            if is_constraint_violation(&e) {
                tracing::warn!("Quiz creation failed for user {}: {}", user_id, e);
                AppError::Conflict("Invalid quiz data - referenced data may not exist".to_string())
            } else {
                tracing::error!("Failed to create quiz for user {}: {:?}", user_id, e);
                AppError::from(e)
            }
        })?;
    tx.commit().await?;

    tracing::info!("Quiz {} created by user {}", detail.quiz.id, user_id);
    Ok(detail)
}

/// Fetches a quiz. Rows the requester cannot access are reported as not
/// found, indistinguishable from rows that do not exist.
pub async fn get_quiz(
    pool: &PgPool,
    requester: &Identity,
    quiz_id: i64,
) -> Result<Quiz, AppError> {
    let quiz = repo::quiz::find_by_id(pool, quiz_id)
        .await?
        .filter(|quiz| can_access(requester.role, quiz.user_id, requester.user_id))
        .ok_or_else(|| quiz_not_found(quiz_id))?;

    Ok(quiz)
}

/// Lists quizzes visible to the requester, newest first. The ownership
/// filter feeds both the count and the page query.
pub async fn list_quizzes(
    pool: &PgPool,
    requester: &Identity,
    pagination: Pagination,
) -> Result<Paginated<Quiz>, AppError> {
    let pagination = pagination.normalized();
    let owner = if requester.role.is_admin() {
        None
    } else {
        Some(requester.user_id)
    };

    let total = repo::quiz::count(pool, owner).await?;
    let items = repo::quiz::list(pool, owner, &pagination).await?;

    tracing::info!(
        "Listed {} of {} quizzes for user {} (page {})",
        items.len(),
        total,
        requester.user_id,
        pagination.page
    );

    Ok(Paginated::new(&pagination, total, items))
}

/// Applies a partial update after the ownership check. An empty payload is
/// a no-op that returns the quiz unchanged. The read-check-write sequence
/// is not protected against a concurrent request hitting the same row.
pub async fn update_quiz(
    pool: &PgPool,
    requester: &Identity,
    quiz_id: i64,
    data: UpdateQuizRequest,
) -> Result<Quiz, AppError> {
    let quiz = get_quiz(pool, requester, quiz_id).await?;

    if data.is_empty() {
        return Ok(quiz);
    }

    let updated = repo::quiz::apply_partial_update(pool, quiz_id, &data)
        .await
        .map_err(|e| {
            if is_constraint_violation(&e) {
                tracing::warn!("Quiz update failed for quiz {}: {}", quiz_id, e);
                AppError::Conflict("Invalid quiz data - data conflict".to_string())
            } else {
                tracing::error!("Failed to update quiz {}: {:?}", quiz_id, e);
                AppError::from(e)
            }
        })?
        .ok_or_else(|| quiz_not_found(quiz_id))?;

    tracing::info!("Quiz {} updated by user {}", quiz_id, requester.user_id);
    Ok(updated)
}

/// Deletes a quiz after the ownership check. Questions cascade.
pub async fn delete_quiz(
    pool: &PgPool,
    requester: &Identity,
    quiz_id: i64,
) -> Result<serde_json::Value, AppError> {
    get_quiz(pool, requester, quiz_id).await?;

    let removed = repo::quiz::delete(pool, quiz_id).await?;
    if removed == 0 {
        return Err(quiz_not_found(quiz_id));
    }

    tracing::info!("Quiz {} deleted by user {}", quiz_id, requester.user_id);
    Ok(serde_json::json!({
        "message": format!("Quiz {} deleted successfully", quiz_id),
        "quiz_id": quiz_id,
    }))
}

/// Starts a quiz attempt: PIN-gated reveal of the questions with option
/// order randomized per reveal. The PIN is checked before any question
/// content is loaded, so a wrong PIN never exposes questions.
pub async fn start_quiz(
    pool: &PgPool,
    role: RoleName,
    quiz_id: i64,
    pin: &str,
) -> Result<StartQuizResponse, AppError> {
    tracing::info!("Start requested for quiz {} by role {:?}", quiz_id, role);

    let quiz = repo::quiz::find_by_id(pool, quiz_id)
        .await?
        .ok_or_else(|| quiz_not_found(quiz_id))?;

    if quiz.pin != pin {
        tracing::warn!("Invalid PIN presented for quiz {}", quiz_id);
        return Err(AppError::BadRequest("Invalid PIN for this quiz".to_string()));
    }

    let questions = repo::quiz::find_questions(pool, quiz_id).await?;

    Ok(StartQuizResponse {
        quiz_id: quiz.id,
        quiz_name: quiz.name,
        quiz_number: quiz.quiz_number,
        duration: quiz.duration,
        total_questions: questions.len(),
        questions: questions.iter().map(|q| q.to_view()).collect(),
    })
}

/// Ends a quiz attempt: grades the submission against the stored question
/// set, persists an immutable result row and returns the rounded summary.
pub async fn end_quiz(
    pool: &PgPool,
    user_id: i64,
    role: RoleName,
    data: SubmitQuizRequest,
) -> Result<QuizResultResponse, AppError> {
    tracing::info!(
        "End requested for quiz {} by user {} with role {:?}",
        data.quiz_id,
        user_id,
        role
    );

    let quiz = repo::quiz::find_by_id(pool, data.quiz_id)
        .await?
        .ok_or_else(|| quiz_not_found(data.quiz_id))?;

    let questions = repo::quiz::find_questions(pool, quiz.id).await?;

    let outcome = grading::grade(&questions, &data.answers);

    repo::quiz::insert_result(pool, user_id, quiz.id, &outcome)
        .await
        .map_err(|e| {
            tracing::error!("Failed to persist result for quiz {}: {:?}", quiz.id, e);
            AppError::from(e)
        })?;

    tracing::info!(
        "Quiz {} ended by user {}: {}/{} correct, grade {}",
        quiz.id,
        user_id,
        outcome.correct_answers,
        outcome.total_questions,
        outcome.grade
    );

    Ok(QuizResultResponse {
        quiz_id: quiz.id,
        total_questions: outcome.total_questions,
        correct_answers: outcome.correct_answers,
        incorrect_answers: outcome.incorrect_answers,
        score_percentage: round2(outcome.score_percentage),
        grade: outcome.grade.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(50.0), 50.0);
        assert_eq!(round2(0.0), 0.0);
    }
}
