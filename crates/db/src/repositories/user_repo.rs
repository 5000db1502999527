//! Repository for the `users` table.

use bidflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{NewUser, User, UserChanges, UserFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, role, \
                       is_active, created_at, updated_at, last_login";

/// Provides CRUD and lifecycle operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Uniqueness of username and email is enforced by the `uq_users_*`
    /// constraints; violations surface as database errors.
    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, first_name, last_name, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Used by login and registration.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List users matching every supplied filter, in insertion order.
    ///
    /// Absent filter fields bind as NULL and impose no constraint.
    pub async fn list(pool: &PgPool, filter: &UserFilter) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE ($1::BIGINT IS NULL OR id = $1)
               AND ($2::TEXT IS NULL OR role = $2)
               AND ($3::TEXT IS NULL OR username = $3)
               AND ($4::TEXT IS NULL OR email = $4)
               AND ($5::BOOL IS NULL OR is_active = $5)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(filter.id)
            .bind(&filter.role)
            .bind(&filter.username)
            .bind(&filter.email)
            .bind(filter.is_active)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Only non-`None` fields change; the row's
    /// `updated_at` is refreshed. Returns `None` if no row exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &UserChanges,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                first_name = COALESCE($4, first_name),
                last_name = COALESCE($5, last_name),
                role = COALESCE($6, role),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&changes.username)
            .bind(&changes.email)
            .bind(&changes.first_name)
            .bind(&changes.last_name)
            .bind(&changes.role)
            .bind(changes.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Record a successful login by refreshing `last_login`.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Flip the active flag. The WHERE guard makes the call a no-op
    /// when the flag already holds the target value, so `updated_at`
    /// only moves on a real transition. Returns `true` if a row changed.
    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_active = $2, updated_at = NOW()
             WHERE id = $1 AND is_active <> $2",
        )
        .bind(id)
        .bind(active)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a user. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count proposals authored by a user. Used to forbid deleting an
    /// author with existing proposals.
    pub async fn count_authored_proposals(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM proposals WHERE created_by = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
