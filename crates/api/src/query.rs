//! Query-parameter types for list endpoints.
//!
//! Parameters arrive as raw strings and are coerced through the
//! filter kit in `bidflow_core::filter`; coercion failures surface as
//! 400 `INVALID_FILTER` before any query runs.

use bidflow_core::error::CoreError;
use bidflow_core::filter;
use bidflow_db::models::proposal::ProposalFilter;
use bidflow_db::models::user::UserFilter;
use serde::Deserialize;

/// Raw query parameters for `GET /users`.
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    pub id: Option<String>,
    pub role: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<String>,
}

impl UserListParams {
    /// Coerce every supplied parameter into a typed [`UserFilter`].
    pub fn parse(&self) -> Result<UserFilter, CoreError> {
        Ok(UserFilter {
            id: filter::numeric("id", self.id.as_deref())?,
            role: filter::equality("role", self.role.as_deref())?,
            username: filter::equality("username", self.username.as_deref())?,
            email: filter::equality("email", self.email.as_deref())?,
            is_active: filter::bool_token("is_active", self.is_active.as_deref())?,
        })
    }
}

/// Raw query parameters for `GET /proposals`.
#[derive(Debug, Default, Deserialize)]
pub struct ProposalListParams {
    pub name: Option<String>,
    pub client: Option<String>,
    pub client_name: Option<String>,
    pub created_by: Option<String>,
    pub opportunity_status: Option<String>,
}

impl ProposalListParams {
    /// Coerce every supplied parameter into a typed [`ProposalFilter`].
    pub fn parse(&self) -> Result<ProposalFilter, CoreError> {
        Ok(ProposalFilter {
            name: filter::substring("name", self.name.as_deref())?,
            client: filter::substring("client", self.client.as_deref())?,
            client_name: filter::substring("client_name", self.client_name.as_deref())?,
            created_by: filter::numeric("created_by", self.created_by.as_deref())?,
            opportunity_status: filter::equality(
                "opportunity_status",
                self.opportunity_status.as_deref(),
            )?,
        })
    }
}

/// Expansion flags for task reads (`?include_subtasks=&include_proposal=`).
#[derive(Debug, Default, Deserialize)]
pub struct TaskExpandParams {
    #[serde(default)]
    pub include_subtasks: bool,
    #[serde(default)]
    pub include_proposal: bool,
}
