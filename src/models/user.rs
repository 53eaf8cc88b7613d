// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
///
/// Authorization for quiz operations uses the role string supplied by the
/// identity provider, not these rows. The `roles` relation below is
/// assignment bookkeeping only.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Represents the 'roles' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

/// User together with the roles assigned through the association table.
#[derive(Debug, Serialize)]
pub struct UserWithRoles {
    pub id: i64,
    pub username: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub roles: Vec<Role>,
}

/// DTO for assigning (or removing) a single role.
#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub user_id: i64,
    pub role_id: i64,
}

/// DTO for assigning several roles in one all-or-nothing batch.
#[derive(Debug, Deserialize, Validate)]
pub struct AssignRoleListRequest {
    pub user_id: i64,
    #[validate(length(min = 1))]
    pub role_ids: Vec<i64>,
}

/// DTO for renaming a user.
#[derive(Debug, Deserialize, Validate)]
pub struct RenameUserRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub username: String,
}

/// Query parameters for listing users.
#[derive(Debug, Deserialize)]
pub struct UserSearchParams {
    /// Optional case-insensitive username search.
    pub q: Option<String>,
}
