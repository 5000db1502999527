//! Repository for the `tasks` table.

use bidflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, proposal_id, title, description, sort_order, created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a standalone task.
    ///
    /// When the payload omits a position, the task is appended after
    /// the proposal's current highest `sort_order`. The fallback is
    /// computed inside the INSERT so concurrent appends stay
    /// consistent under the store's isolation.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (proposal_id, title, description, sort_order)
             VALUES ($1, $2, $3, COALESCE($4,
                 (SELECT COALESCE(MAX(sort_order), 0) + 1 FROM tasks WHERE proposal_id = $1)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.proposal_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find a task by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tasks belonging to a proposal, in display order.
    pub async fn list_by_proposal(
        pool: &PgPool,
        proposal_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE proposal_id = $1 ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(proposal_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a task with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tasks WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
