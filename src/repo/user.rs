// src/repo/user.rs
//
// Adapter over the users/roles tables and their association.

use sqlx::PgExecutor;

use crate::models::{
    pagination::Pagination,
    user::{Role, User},
};

const USER_COLUMNS: &str = "id, username, created_at";

/// Username search shared by the count and page queries.
const SEARCH_FILTER: &str = "($1::TEXT IS NULL OR username ILIKE $1)";

pub async fn find_user(
    executor: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(user_id)
        .fetch_optional(executor)
        .await
}

pub async fn find_role(
    executor: impl PgExecutor<'_>,
    role_id: i64,
) -> Result<Option<Role>, sqlx::Error> {
    sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE id = $1")
        .bind(role_id)
        .fetch_optional(executor)
        .await
}

pub async fn roles_for_user(
    executor: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Vec<Role>, sqlx::Error> {
    sqlx::query_as::<_, Role>(
        "SELECT r.id, r.name FROM roles r \
         JOIN user_roles ur ON ur.role_id = r.id \
         WHERE ur.user_id = $1 ORDER BY r.id",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Inserts one (user, role) association row. Duplicate pairs surface as a
/// unique-constraint violation for the caller to map.
pub async fn insert_association(
    executor: impl PgExecutor<'_>,
    user_id: i64,
    role_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(role_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Removes one (user, role) association row. Returns rows affected.
pub async fn delete_association(
    executor: impl PgExecutor<'_>,
    user_id: i64,
    role_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role_id = $2")
        .bind(user_id)
        .bind(role_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_users(
    executor: impl PgExecutor<'_>,
    search: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let pattern = search.map(|q| format!("%{}%", q));
    let (total,): (i64,) =
        sqlx::query_as(&format!("SELECT COUNT(*) FROM users WHERE {SEARCH_FILTER}"))
            .bind(pattern)
            .fetch_one(executor)
            .await?;
    Ok(total)
}

pub async fn list_users(
    executor: impl PgExecutor<'_>,
    search: Option<&str>,
    pagination: &Pagination,
) -> Result<Vec<User>, sqlx::Error> {
    let pattern = search.map(|q| format!("%{}%", q));
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE {SEARCH_FILTER} \
         ORDER BY id LIMIT $2 OFFSET $3"
    ))
    .bind(pattern)
    .bind(pagination.limit)
    .bind(pagination.offset())
    .fetch_all(executor)
    .await
}

/// Renames a user, returning the updated row or None when absent.
pub async fn rename(
    executor: impl PgExecutor<'_>,
    user_id: i64,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET username = $1 WHERE id = $2 RETURNING {USER_COLUMNS}"
    ))
    .bind(username)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Deletes a user; association rows cascade at the schema level.
pub async fn delete_user(
    executor: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
