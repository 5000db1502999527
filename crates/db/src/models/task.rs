//! Task entity model and DTOs.

use bidflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::proposal::ProposalDetail;
use crate::models::subtask::Subtask;

/// A task row from the `tasks` table.
///
/// The display position lives in the `sort_order` column but is
/// serialized as `order` to keep the wire shape stable.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub proposal_id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A task expanded with optional subtasks and/or its owning proposal.
///
/// Expansion axes are independent; `None` fields are omitted from the
/// serialized form. Expanding the proposal embeds its creator but
/// never the proposal's other tasks.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<ProposalDetail>,
}

/// Request body for standalone task creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub proposal_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// When omitted, the task is appended after the proposal's current
    /// highest position.
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        let now = chrono::Utc::now();
        Task {
            id: 7,
            proposal_id: 3,
            title: "Design".to_string(),
            description: None,
            sort_order: 2,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_task_serializes_position_as_order() {
        let value = serde_json::to_value(sample_task()).unwrap();
        assert_eq!(value["order"], 2);
        assert!(value.get("sort_order").is_none());
    }

    #[test]
    fn test_detail_flattens_and_omits_absent_expansions() {
        let now = chrono::Utc::now();
        let detail = TaskDetail {
            task: sample_task(),
            subtasks: Some(vec![Subtask {
                id: 11,
                task_id: 7,
                title: "Survey".to_string(),
                hours: 8,
                sort_order: 1,
                created_at: now,
                updated_at: now,
            }]),
            proposal: None,
        };
        let value = serde_json::to_value(detail).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["title"], "Design");
        assert_eq!(value["subtasks"][0]["hours"], 8);
        assert_eq!(value["subtasks"][0]["order"], 1);
        assert!(value.get("proposal").is_none());
    }
}
