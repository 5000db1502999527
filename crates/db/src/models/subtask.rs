//! Subtask entity model and DTOs.

use bidflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A subtask row from the `subtasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subtask {
    pub id: DbId,
    pub task_id: DbId,
    pub title: String,
    pub hours: i32,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for standalone subtask creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubtask {
    pub task_id: DbId,
    pub title: String,
    pub hours: Option<i32>,
    /// When omitted, the subtask is appended after the task's current
    /// highest position.
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}
