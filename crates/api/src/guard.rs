//! Explicit authorization guard for privileged operations.
//!
//! Called at the top of each privileged handler rather than installed
//! as middleware, so the authorization decision is visible at the call
//! site and always reflects the store's current state.

use bidflow_core::error::CoreError;
use bidflow_core::types::DbId;
use bidflow_db::models::user::User;
use bidflow_db::repositories::UserRepo;
use bidflow_db::DbPool;

use crate::error::{AppError, AppResult};

/// Re-load the acting principal and require a role.
///
/// The role is read from the store on every call -- never from the
/// token payload or a cache. A missing, deactivated, or
/// insufficiently-privileged principal is rejected with 403.
pub async fn require_role(pool: &DbPool, principal_id: DbId, required: &str) -> AppResult<User> {
    let user = UserRepo::find_by_id(pool, principal_id).await?;
    match user {
        Some(user) if user.is_active && user.role == required => Ok(user),
        _ => Err(AppError::Core(CoreError::Forbidden(
            "Access denied, insufficient permissions".into(),
        ))),
    }
}
