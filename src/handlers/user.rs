// src/handlers/user.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        pagination::Pagination,
        user::{AssignRoleListRequest, AssignRoleRequest, RenameUserRequest, UserSearchParams},
    },
    services,
};

/// Assigns a single role to a user.
pub async fn assign_role(
    State(pool): State<PgPool>,
    Json(payload): Json<AssignRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let confirmation = services::user::assign_role(&pool, payload).await?;
    Ok(Json(confirmation))
}

/// Assigns a list of roles, all-or-nothing.
pub async fn assign_role_list(
    State(pool): State<PgPool>,
    Json(payload): Json<AssignRoleListRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let confirmation = services::user::assign_role_list(&pool, payload).await?;
    Ok(Json(confirmation))
}

/// Removes a role assignment from a user.
pub async fn remove_role(
    State(pool): State<PgPool>,
    Json(payload): Json<AssignRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let confirmation = services::user::remove_role(&pool, payload).await?;
    Ok(Json(confirmation))
}

/// Retrieves a user with their roles loaded.
pub async fn get_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = services::user::get_user_with_roles(&pool, id).await?;
    Ok(Json(user))
}

/// Lists users, paginated, with optional username search.
pub async fn list_users(
    State(pool): State<PgPool>,
    Query(pagination): Query<Pagination>,
    Query(search): Query<UserSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = services::user::list_users(&pool, pagination, search.q).await?;
    Ok(Json(page))
}

/// Renames a user.
pub async fn rename_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<RenameUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = services::user::rename_user(&pool, id, payload).await?;
    Ok(Json(user))
}

/// Deletes a user (role assignments cascade).
pub async fn delete_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let confirmation = services::user::delete_user(&pool, id).await?;
    Ok(Json(confirmation))
}
