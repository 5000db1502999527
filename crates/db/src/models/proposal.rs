//! Proposal entity model and DTOs.

use bidflow_core::error::CoreError;
use bidflow_core::proposal::{
    coerce_budget, OpportunityStatus, DEFAULT_BUSINESS_UNIT, DEFAULT_RESOURCE_NAME,
};
use bidflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::user::User;

/// A proposal row from the `proposals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Proposal {
    pub id: DbId,
    pub name: String,
    pub site: String,
    pub client: String,
    pub client_name: String,
    pub quote_number: String,
    pub budget: Option<f64>,
    pub description: Option<String>,
    pub business_unit: String,
    pub opportunity_status: String,
    pub resource_name: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A proposal expanded with its creator for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalDetail {
    #[serde(flatten)]
    pub proposal: Proposal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<User>,
}

/// Request body for proposal creation, with optional nested tasks.
///
/// Required fields are modelled as `Option` so their absence surfaces
/// as a domain validation error naming the field, not as a
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProposal {
    pub name: Option<String>,
    pub site: Option<String>,
    pub client: Option<String>,
    pub quote_number: Option<String>,
    pub client_name: Option<String>,
    pub budget: Option<serde_json::Value>,
    pub description: Option<String>,
    pub business_unit: Option<String>,
    pub opportunity_status: Option<String>,
    pub resource_name: Option<String>,
    #[serde(default)]
    pub tasks: Vec<CreateNestedTask>,
}

/// A task payload nested inside a proposal creation request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNestedTask {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub subtasks: Vec<CreateNestedSubtask>,
}

/// A subtask payload nested inside a task payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNestedSubtask {
    pub title: Option<String>,
    pub hours: Option<i32>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

/// Fully validated proposal creation input. `created_by` is supplied
/// separately from the authenticated principal, never from the payload.
#[derive(Debug, Clone)]
pub struct NewProposal {
    pub name: String,
    pub site: String,
    pub client: String,
    pub quote_number: String,
    pub client_name: String,
    pub budget: Option<f64>,
    pub description: Option<String>,
    pub business_unit: String,
    pub opportunity_status: OpportunityStatus,
    pub resource_name: String,
    pub tasks: Vec<NewTask>,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub subtasks: Vec<NewSubtask>,
}

#[derive(Debug, Clone)]
pub struct NewSubtask {
    pub title: String,
    pub hours: i32,
    pub sort_order: i32,
}

/// Pull one required field out of the payload, failing if it is absent
/// or blank.
fn required(field: &str, value: Option<String>) -> Result<String, CoreError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!(
            "Missing required field: {field}"
        ))),
    }
}

impl CreateProposal {
    /// Validate the full payload, nested tasks and subtasks included,
    /// before any write happens.
    pub fn validate(self) -> Result<NewProposal, CoreError> {
        let name = required("name", self.name)?;
        let site = required("site", self.site)?;
        let client = required("client", self.client)?;
        let quote_number = required("quote_number", self.quote_number)?;
        let client_name = required("client_name", self.client_name)?;

        let budget = match &self.budget {
            Some(raw) => Some(coerce_budget(raw)?),
            None => None,
        };

        let opportunity_status = match self.opportunity_status.as_deref() {
            Some(raw) => OpportunityStatus::from_str(raw.trim())?,
            None => OpportunityStatus::default(),
        };

        let mut tasks = Vec::with_capacity(self.tasks.len());
        for task in self.tasks {
            let title = required("title", task.title)?;
            let mut subtasks = Vec::with_capacity(task.subtasks.len());
            for subtask in task.subtasks {
                let hours = subtask.hours.unwrap_or(0);
                if hours < 0 {
                    return Err(CoreError::Validation(
                        "Subtask hours must be non-negative".to_string(),
                    ));
                }
                subtasks.push(NewSubtask {
                    title: required("title", subtask.title)?,
                    hours,
                    sort_order: subtask.sort_order.unwrap_or(0),
                });
            }
            tasks.push(NewTask {
                title,
                description: task.description.map(|s| s.trim().to_string()),
                sort_order: task.sort_order.unwrap_or(0),
                subtasks,
            });
        }

        Ok(NewProposal {
            name,
            site,
            client,
            quote_number,
            client_name,
            budget,
            description: self.description.map(|s| s.trim().to_string()),
            business_unit: self
                .business_unit
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BUSINESS_UNIT.to_string()),
            opportunity_status,
            resource_name: self
                .resource_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_RESOURCE_NAME.to_string()),
            tasks,
        })
    }
}

/// PUT body for partial proposal update. Unknown keys are ignored by
/// serde; only whitelisted fields appear here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProposal {
    pub name: Option<String>,
    pub site: Option<String>,
    pub client: Option<String>,
    pub quote_number: Option<String>,
    pub client_name: Option<String>,
    pub budget: Option<serde_json::Value>,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
    pub business_unit: Option<String>,
    pub opportunity_status: Option<String>,
    pub resource_name: Option<String>,
}

/// Validated, trimmed field set ready to apply to a proposal row.
#[derive(Debug, Clone)]
pub struct ProposalChanges {
    pub name: Option<String>,
    pub site: Option<String>,
    pub client: Option<String>,
    pub quote_number: Option<String>,
    pub client_name: Option<String>,
    pub budget: Option<f64>,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
    pub business_unit: Option<String>,
    pub opportunity_status: Option<String>,
    pub resource_name: Option<String>,
}

impl UpdateProposal {
    /// Validate the payload before any mutation is applied.
    ///
    /// The referenced `created_by` user, when present, is checked for
    /// existence by the caller against the store.
    pub fn validate(self) -> Result<ProposalChanges, CoreError> {
        let is_empty = self.name.is_none()
            && self.site.is_none()
            && self.client.is_none()
            && self.quote_number.is_none()
            && self.client_name.is_none()
            && self.budget.is_none()
            && self.description.is_none()
            && self.created_by.is_none()
            && self.business_unit.is_none()
            && self.opportunity_status.is_none()
            && self.resource_name.is_none();
        if is_empty {
            return Err(CoreError::Validation(
                "No valid fields provided for update".to_string(),
            ));
        }

        let name = self.name.map(|s| s.trim().to_string());
        if matches!(name.as_deref(), Some("")) {
            return Err(CoreError::Validation(
                "Proposal name cannot be empty".to_string(),
            ));
        }

        let budget = match &self.budget {
            Some(raw) => Some(coerce_budget(raw)?),
            None => None,
        };

        let opportunity_status = match self.opportunity_status.as_deref() {
            Some(raw) => Some(OpportunityStatus::from_str(raw.trim())?.as_str().to_string()),
            None => None,
        };

        Ok(ProposalChanges {
            name,
            site: self.site.map(|s| s.trim().to_string()),
            client: self.client.map(|s| s.trim().to_string()),
            quote_number: self.quote_number.map(|s| s.trim().to_string()),
            client_name: self.client_name.map(|s| s.trim().to_string()),
            budget,
            description: self.description.map(|s| s.trim().to_string()),
            created_by: self.created_by,
            business_unit: self.business_unit.map(|s| s.trim().to_string()),
            opportunity_status,
            resource_name: self.resource_name.map(|s| s.trim().to_string()),
        })
    }
}

/// Coerced filter set for the proposal list query.
#[derive(Debug, Clone, Default)]
pub struct ProposalFilter {
    /// Case-insensitive substring match on `name`.
    pub name: Option<String>,
    /// Case-insensitive substring match on `client`.
    pub client: Option<String>,
    /// Case-insensitive substring match on `client_name`.
    pub client_name: Option<String>,
    pub created_by: Option<DbId>,
    pub opportunity_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn full_payload() -> CreateProposal {
        serde_json::from_value(json!({
            "name": "Plant upgrade",
            "site": "North Works",
            "client": "Acme",
            "quote_number": "Q-1001",
            "client_name": "Acme Industrial",
        }))
        .unwrap()
    }

    #[test]
    fn test_create_missing_required_field_names_it() {
        let mut payload = full_payload();
        payload.quote_number = None;
        let err = payload.validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("quote_number"));
    }

    #[test]
    fn test_create_blank_required_field_rejected() {
        let mut payload = full_payload();
        payload.site = Some("   ".to_string());
        assert_matches!(payload.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_create_applies_defaults() {
        let new = full_payload().validate().unwrap();
        assert_eq!(new.business_unit, "In House Project");
        assert_eq!(new.resource_name, "Automation Team");
        assert_eq!(new.opportunity_status, OpportunityStatus::Quote);
    }

    #[test]
    fn test_create_validates_nested_tasks_before_any_write() {
        let payload: CreateProposal = serde_json::from_value(json!({
            "name": "N", "site": "S", "client": "C",
            "quote_number": "Q", "client_name": "CN",
            "tasks": [
                { "title": "ok", "subtasks": [{ "title": "fine", "hours": 2 }] },
                { "subtasks": [] }
            ]
        }))
        .unwrap();
        assert_matches!(payload.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_create_rejects_negative_subtask_hours() {
        let payload: CreateProposal = serde_json::from_value(json!({
            "name": "N", "site": "S", "client": "C",
            "quote_number": "Q", "client_name": "CN",
            "tasks": [{ "title": "t", "subtasks": [{ "title": "s", "hours": -1 }] }]
        }))
        .unwrap();
        assert_matches!(payload.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_create_coerces_string_budget() {
        let mut payload = full_payload();
        payload.budget = Some(json!("1200.50"));
        assert_eq!(payload.validate().unwrap().budget, Some(1200.50));
    }

    #[test]
    fn test_update_rejects_empty_field_set() {
        assert_matches!(
            UpdateProposal::default().validate(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_update_unknown_keys_ignored_but_known_applied() {
        let payload: UpdateProposal = serde_json::from_value(json!({
            "name": "  Renamed  ",
            "not_a_field": "ignored"
        }))
        .unwrap();
        let changes = payload.validate().unwrap();
        assert_eq!(changes.name.as_deref(), Some("Renamed"));
    }

    #[test]
    fn test_update_rejects_negative_budget() {
        let payload = UpdateProposal {
            budget: Some(json!(-5)),
            ..Default::default()
        };
        assert_matches!(payload.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_update_rejects_bad_status() {
        let payload = UpdateProposal {
            opportunity_status: Some("Won".to_string()),
            ..Default::default()
        };
        assert_matches!(payload.validate(), Err(CoreError::Validation(_)));
    }
}
