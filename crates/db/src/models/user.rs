//! User entity model and DTOs.

use bidflow_core::error::CoreError;
use bidflow_core::roles;
use bidflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    /// Never leaves the server; excluded from every serialized projection.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub last_login: Option<Timestamp>,
}

/// Validated registration input.
///
/// Built by the API layer after trimming, role normalization, and
/// password hashing; the repository inserts it verbatim.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

/// PATCH body for partial user update. Unknown keys are ignored by
/// serde; only whitelisted fields appear here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Validated, trimmed field set ready to apply to a user row.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUser {
    /// Validate the payload before any mutation is applied.
    ///
    /// Rejects an empty field set, blank username/email, and roles
    /// outside the fixed enumeration. String values are trimmed.
    /// Email format and username uniqueness are not checked here;
    /// uniqueness races surface as store-level constraint violations.
    pub fn validate(self) -> Result<UserChanges, CoreError> {
        let is_empty = self.username.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.role.is_none()
            && self.is_active.is_none();
        if is_empty {
            return Err(CoreError::Validation(
                "No valid fields provided for update".to_string(),
            ));
        }

        let username = self.username.map(|s| s.trim().to_string());
        if matches!(username.as_deref(), Some("")) {
            return Err(CoreError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }

        let email = self.email.map(|s| s.trim().to_string());
        if matches!(email.as_deref(), Some("")) {
            return Err(CoreError::Validation("Email cannot be empty".to_string()));
        }

        let role = match self.role {
            Some(raw) => Some(roles::normalize_role(&raw)?),
            None => None,
        };

        Ok(UserChanges {
            username,
            email,
            first_name: self.first_name.map(|s| s.trim().to_string()),
            last_name: self.last_name.map(|s| s.trim().to_string()),
            role,
            is_active: self.is_active,
        })
    }
}

/// Coerced filter set for the user list query. Absent fields are
/// unconstrained; all present fields compose conjunctively.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub id: Option<DbId>,
    pub role: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_update_rejects_empty_field_set() {
        assert_matches!(
            UpdateUser::default().validate(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_update_trims_strings() {
        let changes = UpdateUser {
            username: Some("  alice  ".to_string()),
            first_name: Some(" Alice ".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(changes.username.as_deref(), Some("alice"));
        assert_eq!(changes.first_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_update_rejects_blank_username_and_email() {
        let result = UpdateUser {
            username: Some("   ".to_string()),
            ..Default::default()
        }
        .validate();
        assert_matches!(result, Err(CoreError::Validation(_)));

        let result = UpdateUser {
            email: Some("".to_string()),
            ..Default::default()
        }
        .validate();
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_update_normalizes_and_checks_role() {
        let changes = UpdateUser {
            role: Some("Moderator".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(changes.role.as_deref(), Some("moderator"));

        let result = UpdateUser {
            role: Some("superuser".to_string()),
            ..Default::default()
        }
        .validate();
        assert_matches!(result, Err(CoreError::Validation(_)));
    }
}
