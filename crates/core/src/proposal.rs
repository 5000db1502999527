//! Proposal domain rules: opportunity status, defaults, and budget
//! coercion.

use serde::Serialize;

use crate::error::CoreError;

/// Default business unit applied when a create payload omits it.
pub const DEFAULT_BUSINESS_UNIT: &str = "In House Project";

/// Default resource name applied when a create payload omits it.
pub const DEFAULT_RESOURCE_NAME: &str = "Automation Team";

/// Fixed set of opportunity statuses a proposal can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpportunityStatus {
    Quote,
    Approved,
    Rejected,
    Pending,
}

/// All valid opportunity status strings.
const VALID_STATUS_STRINGS: &[&str] = &["Quote", "Approved", "Rejected", "Pending"];

impl OpportunityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quote => "Quote",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Pending => "Pending",
        }
    }

    /// Parse a status from its exact string form.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "Quote" => Ok(Self::Quote),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            "Pending" => Ok(Self::Pending),
            _ => Err(CoreError::Validation(format!(
                "Invalid opportunity status '{s}'. Allowed: {}",
                VALID_STATUS_STRINGS.join(", ")
            ))),
        }
    }
}

impl Default for OpportunityStatus {
    fn default() -> Self {
        Self::Quote
    }
}

/// Coerce a budget value from a loosely-typed payload field.
///
/// The boundary hands budgets through as parsed JSON scalars, so both a
/// number and a numeric string are accepted. The value must be finite
/// and non-negative.
pub fn coerce_budget(value: &serde_json::Value) -> Result<f64, CoreError> {
    let budget = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| CoreError::Validation("Invalid budget format".to_string()))?;

    if !budget.is_finite() {
        return Err(CoreError::Validation("Invalid budget format".to_string()));
    }
    if budget < 0.0 {
        return Err(CoreError::Validation(
            "Budget must be a non-negative number".to_string(),
        ));
    }
    Ok(budget)
}
