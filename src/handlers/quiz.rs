// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    authz::Identity,
    error::AppError,
    models::{
        pagination::Pagination,
        quiz::{CreateQuizRequest, StartQuizRequest, UpdateQuizRequest},
        result::SubmitQuizRequest,
    },
    services,
};

/// Creates a quiz owned by the calling user.
pub async fn create_quiz(
    State(pool): State<PgPool>,
    identity: Identity,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let detail = services::quiz::create_quiz(&pool, identity.user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

/// Retrieves a quiz, subject to the ownership filter.
pub async fn get_quiz(
    State(pool): State<PgPool>,
    identity: Identity,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = services::quiz::get_quiz(&pool, &identity, id).await?;
    Ok(Json(quiz))
}

/// Lists quizzes visible to the caller, paginated.
pub async fn list_quizzes(
    State(pool): State<PgPool>,
    identity: Identity,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let page = services::quiz::list_quizzes(&pool, &identity, pagination).await?;
    Ok(Json(page))
}

/// Applies a partial update to a quiz.
pub async fn update_quiz(
    State(pool): State<PgPool>,
    identity: Identity,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let quiz = services::quiz::update_quiz(&pool, &identity, id, payload).await?;
    Ok(Json(quiz))
}

/// Deletes a quiz (questions cascade).
pub async fn delete_quiz(
    State(pool): State<PgPool>,
    identity: Identity,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let confirmation = services::quiz::delete_quiz(&pool, &identity, id).await?;
    Ok(Json(confirmation))
}

/// Starts a quiz attempt: PIN-gated question reveal with shuffled options.
pub async fn start_quiz(
    State(pool): State<PgPool>,
    identity: Identity,
    Path(id): Path<i64>,
    Json(payload): Json<StartQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let started = services::quiz::start_quiz(&pool, identity.role, id, &payload.pin).await?;
    Ok(Json(started))
}

/// Ends a quiz attempt: grades the submission and persists the result.
pub async fn end_quiz(
    State(pool): State<PgPool>,
    identity: Identity,
    Json(payload): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let summary =
        services::quiz::end_quiz(&pool, identity.user_id, identity.role, payload).await?;
    Ok(Json(summary))
}
