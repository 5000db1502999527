//! Role names and membership validation.

use crate::error::CoreError;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MODERATOR: &str = "moderator";

/// All valid role names, in declaration order.
pub const ALL_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN, ROLE_MODERATOR];

/// Normalize a role string to its canonical lowercase form, rejecting
/// anything outside the fixed set.
pub fn normalize_role(raw: &str) -> Result<String, CoreError> {
    let role = raw.trim().to_lowercase();
    if ALL_ROLES.contains(&role.as_str()) {
        Ok(role)
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{raw}'. Allowed: {}",
            ALL_ROLES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_normalize_role_accepts_known_roles() {
        assert_eq!(normalize_role("admin").unwrap(), "admin");
        assert_eq!(normalize_role(" Moderator ").unwrap(), "moderator");
        assert_eq!(normalize_role("USER").unwrap(), "user");
    }

    #[test]
    fn test_normalize_role_rejects_unknown() {
        assert_matches!(normalize_role("root"), Err(CoreError::Validation(_)));
        assert_matches!(normalize_role(""), Err(CoreError::Validation(_)));
    }
}
