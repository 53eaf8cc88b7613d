// src/services/user.rs
//
// User/role assignment over the many-to-many association. Batch
// assignment is all-or-nothing: every insert runs in one transaction and
// the first duplicate aborts the whole batch.

use sqlx::PgPool;

use crate::{
    error::{AppError, is_unique_violation},
    models::{
        pagination::{Paginated, Pagination},
        user::{
            AssignRoleListRequest, AssignRoleRequest, RenameUserRequest, User, UserWithRoles,
        },
    },
    repo,
};

fn user_not_found(user_id: i64) -> AppError {
    AppError::NotFound(format!("User with id {} not found", user_id))
}

/// Assigns a single role to a user. Duplicate assignments are rejected.
pub async fn assign_role(
    pool: &PgPool,
    data: AssignRoleRequest,
) -> Result<serde_json::Value, AppError> {
    repo::user::find_user(pool, data.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    repo::user::find_role(pool, data.role_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Role not found".to_string()))?;

    repo::user::insert_association(pool, data.user_id, data.role_id)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::BadRequest("Role already assigned to this user".to_string())
            } else {
                tracing::error!(
                    "Failed to assign role {} to user {}: {:?}",
                    data.role_id,
                    data.user_id,
                    e
                );
                AppError::from(e)
            }
        })?;

    tracing::info!("Role {} assigned to user {}", data.role_id, data.user_id);
    Ok(serde_json::json!({
        "message": "Role assigned successfully",
        "user_id": data.user_id,
        "role_id": data.role_id,
    }))
}

/// Assigns a list of roles in one transaction. Every role is pre-checked
/// for existence; a duplicate anywhere in the batch rolls back all prior
/// inserts, leaving no role assigned.
pub async fn assign_role_list(
    pool: &PgPool,
    data: AssignRoleListRequest,
) -> Result<serde_json::Value, AppError> {
    let mut tx = pool.begin().await?;

    repo::user::find_user(&mut *tx, data.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    for role_id in &data.role_ids {
        repo::user::find_role(&mut *tx, *role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role not found: {}", role_id)))?;
    }

    for role_id in &data.role_ids {
        repo::user::insert_association(&mut *tx, data.user_id, *role_id)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    // Transaction drops here, rolling back earlier inserts.
                    AppError::BadRequest("One or more roles already assigned".to_string())
                } else {
                    tracing::error!(
                        "Failed to assign role {} to user {}: {:?}",
                        role_id,
                        data.user_id,
                        e
                    );
                    AppError::from(e)
                }
            })?;
    }

    tx.commit().await?;

    tracing::info!(
        "Assigned {} roles to user {}",
        data.role_ids.len(),
        data.user_id
    );
    Ok(serde_json::json!({
        "message": "Roles assigned successfully",
        "user_id": data.user_id,
        "role_ids": data.role_ids,
    }))
}

/// Removes a role assignment from a user.
pub async fn remove_role(
    pool: &PgPool,
    data: AssignRoleRequest,
) -> Result<serde_json::Value, AppError> {
    repo::user::find_user(pool, data.user_id)
        .await?
        .ok_or_else(|| user_not_found(data.user_id))?;

    repo::user::find_role(pool, data.role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role with id {} not found", data.role_id)))?;

    let removed = repo::user::delete_association(pool, data.user_id, data.role_id).await?;
    if removed == 0 {
        return Err(AppError::NotFound(format!(
            "Role assignment not found for user {} and role {}",
            data.user_id, data.role_id
        )));
    }

    tracing::info!("Role {} removed from user {}", data.role_id, data.user_id);
    Ok(serde_json::json!({
        "message": "Role successfully removed from user",
        "user_id": data.user_id,
        "role_id": data.role_id,
    }))
}

/// Fetches a user with their assigned roles eagerly loaded.
pub async fn get_user_with_roles(pool: &PgPool, user_id: i64) -> Result<UserWithRoles, AppError> {
    let user = repo::user::find_user(pool, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    let roles = repo::user::roles_for_user(pool, user_id).await?;

    Ok(UserWithRoles {
        id: user.id,
        username: user.username,
        created_at: user.created_at,
        roles,
    })
}

/// Lists users, paginated, with optional username search.
pub async fn list_users(
    pool: &PgPool,
    pagination: Pagination,
    search: Option<String>,
) -> Result<Paginated<User>, AppError> {
    let pagination = pagination.normalized();
    let search = search.as_deref().filter(|q| !q.is_empty());

    let total = repo::user::count_users(pool, search).await?;
    let items = repo::user::list_users(pool, search, &pagination).await?;

    Ok(Paginated::new(&pagination, total, items))
}

/// Renames a user. Duplicate usernames conflict.
pub async fn rename_user(
    pool: &PgPool,
    user_id: i64,
    data: RenameUserRequest,
) -> Result<User, AppError> {
    let user = repo::user::rename(pool, user_id, &data.username)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("Username '{}' already exists", data.username))
            } else {
                tracing::error!("Failed to rename user {}: {:?}", user_id, e);
                AppError::from(e)
            }
        })?
        .ok_or_else(|| user_not_found(user_id))?;

    tracing::info!("User {} renamed to '{}'", user_id, user.username);
    Ok(user)
}

/// Deletes a user; association rows cascade.
pub async fn delete_user(pool: &PgPool, user_id: i64) -> Result<serde_json::Value, AppError> {
    let removed = repo::user::delete_user(pool, user_id).await?;
    if removed == 0 {
        return Err(user_not_found(user_id));
    }

    tracing::info!("User {} deleted", user_id);
    Ok(serde_json::json!({
        "message": "User deleted successfully",
        "user_id": user_id,
    }))
}
