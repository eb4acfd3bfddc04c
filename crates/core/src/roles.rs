//! Role name constants and validation.

use crate::error::CoreError;

/// Administrator: full back-office access including user management.
pub const ROLE_ADMIN: &str = "admin";

/// Regular back-office user: content management without user administration.
pub const ROLE_USER: &str = "user";

/// All assignable role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];

/// Validate a role name against the known set.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{}'. Valid roles: {}",
            role,
            VALID_ROLES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_known_roles_validate() {
        assert!(validate_role(ROLE_ADMIN).is_ok());
        assert!(validate_role(ROLE_USER).is_ok());
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert_matches!(validate_role("superuser"), Err(CoreError::Validation(_)));
        assert_matches!(validate_role("ADMIN"), Err(CoreError::Validation(_)));
    }
}
