//! Repository for the `subtasks` table.

use bidflow_core::types::DbId;
use sqlx::PgPool;

use crate::models::subtask::{CreateSubtask, Subtask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, title, hours, sort_order, created_at, updated_at";

/// Provides CRUD operations for subtasks.
pub struct SubtaskRepo;

impl SubtaskRepo {
    /// Insert a standalone subtask. Same append-at-end fallback as
    /// [`crate::repositories::TaskRepo::create`].
    pub async fn create(pool: &PgPool, input: &CreateSubtask) -> Result<Subtask, sqlx::Error> {
        let query = format!(
            "INSERT INTO subtasks (task_id, title, hours, sort_order)
             VALUES ($1, $2, $3, COALESCE($4,
                 (SELECT COALESCE(MAX(sort_order), 0) + 1 FROM subtasks WHERE task_id = $1)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(input.task_id)
            .bind(&input.title)
            .bind(input.hours.unwrap_or(0))
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// List all subtasks belonging to a task, in display order.
    pub async fn list_by_task(pool: &PgPool, task_id: DbId) -> Result<Vec<Subtask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subtasks WHERE task_id = $1 ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Subtask>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }
}
