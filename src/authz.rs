// src/authz.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Authorization vocabulary for callers of the quiz lifecycle.
///
/// Note: this is distinct from the relational `Role` entity used for
/// assignment bookkeeping. The two share words like "admin" but serve
/// different purposes: this enum gates operations, the entity records
/// user/role associations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleName {
    Admin,
    Student,
    Guest,
}

impl RoleName {
    /// Parses a caller-supplied role string, case-insensitively.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.to_ascii_lowercase().as_str() {
            "admin" => Ok(RoleName::Admin),
            "student" => Ok(RoleName::Student),
            "guest" => Ok(RoleName::Guest),
            _ => Err(AppError::BadRequest(format!("Invalid user role: {}", raw))),
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, RoleName::Admin)
    }
}

/// Single authorization predicate used by every ownership-filtered
/// operation: admins bypass the row filter, everyone else must own the row.
pub fn can_access(role: RoleName, owner_id: i64, requester_id: i64) -> bool {
    role.is_admin() || owner_id == requester_id
}

/// Caller identity supplied by the upstream identity provider.
///
/// This service trusts the context as already authenticated; it only
/// reads the user id and role the provider attached to the request.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub role: RoleName,
}

const USER_ID_HEADER: &str = "x-user-id";
const USER_ROLE_HEADER: &str = "x-user-role";

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or_else(|| AppError::AuthError("Missing or invalid user identity".to_string()))?;

        let raw_role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::AuthError("Missing user role".to_string()))?;

        let role = RoleName::parse(raw_role)?;

        Ok(Identity { user_id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_case_insensitive() {
        assert_eq!(RoleName::parse("Admin").unwrap(), RoleName::Admin);
        assert_eq!(RoleName::parse("STUDENT").unwrap(), RoleName::Student);
        assert_eq!(RoleName::parse("guest").unwrap(), RoleName::Guest);
    }

    #[test]
    fn test_parse_role_rejects_unknown() {
        assert!(RoleName::parse("teacher").is_err());
        assert!(RoleName::parse("").is_err());
    }

    #[test]
    fn test_admin_bypasses_ownership() {
        assert!(can_access(RoleName::Admin, 1, 2));
        assert!(can_access(RoleName::Admin, 42, 42));
    }

    #[test]
    fn test_non_admin_must_own_row() {
        assert!(can_access(RoleName::Student, 7, 7));
        assert!(!can_access(RoleName::Student, 7, 8));
        assert!(can_access(RoleName::Guest, 3, 3));
        assert!(!can_access(RoleName::Guest, 3, 4));
    }
}
