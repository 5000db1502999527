//! Filter-coercion kit for list queries.
//!
//! List endpoints accept optional, loosely-typed query parameters.
//! Each supported parameter belongs to one of a closed set of filter
//! kinds, and each kind has exactly one coercion rule:
//!
//! - [`FilterKind::Equality`]: exact match on the trimmed string.
//! - [`FilterKind::Substring`]: case-insensitive "contains" match.
//! - [`FilterKind::Numeric`]: must parse as `i64`, else
//!   [`CoreError::InvalidFilter`].
//! - [`FilterKind::BoolToken`]: accepts only `"true"`/`"false"`
//!   (case-insensitive), else [`CoreError::InvalidFilter`].
//!
//! An absent, empty, or whitespace-only value coerces to `None`,
//! meaning "no constraint", never "match nothing". Supplied filters
//! compose conjunctively in the repository layer.

use crate::error::CoreError;

/// The closed set of filter kinds supported by list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Equality,
    Substring,
    Numeric,
    BoolToken,
}

/// A successfully coerced filter value, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Exact string match.
    Text(String),
    /// Case-insensitive substring match (raw needle, not yet a pattern).
    Contains(String),
    Int(i64),
    Bool(bool),
}

impl FilterKind {
    /// Coerce one raw parameter value.
    ///
    /// Returns `Ok(None)` when the value is absent or blank, `Ok(Some)`
    /// on success, and [`CoreError::InvalidFilter`] when a non-blank
    /// value cannot be coerced. `name` is only used in error messages.
    pub fn coerce(self, name: &str, raw: Option<&str>) -> Result<Option<FilterValue>, CoreError> {
        let trimmed = match raw.map(str::trim) {
            None | Some("") => return Ok(None),
            Some(t) => t,
        };
        match self {
            FilterKind::Equality => Ok(Some(FilterValue::Text(trimmed.to_string()))),
            FilterKind::Substring => Ok(Some(FilterValue::Contains(trimmed.to_string()))),
            FilterKind::Numeric => match trimmed.parse::<i64>() {
                Ok(n) => Ok(Some(FilterValue::Int(n))),
                Err(_) => Err(CoreError::InvalidFilter(format!(
                    "Invalid {name} parameter: '{trimmed}' is not a number"
                ))),
            },
            FilterKind::BoolToken => match trimmed.to_lowercase().as_str() {
                "true" => Ok(Some(FilterValue::Bool(true))),
                "false" => Ok(Some(FilterValue::Bool(false))),
                _ => Err(CoreError::InvalidFilter(format!(
                    "Invalid {name} parameter: expected 'true' or 'false', got '{trimmed}'"
                ))),
            },
        }
    }
}

/// Coerce an equality filter, returning the trimmed value.
pub fn equality(name: &str, raw: Option<&str>) -> Result<Option<String>, CoreError> {
    Ok(FilterKind::Equality
        .coerce(name, raw)?
        .map(|v| match v {
            FilterValue::Text(s) => s,
            _ => unreachable!(),
        }))
}

/// Coerce a substring filter, returning the trimmed needle.
pub fn substring(name: &str, raw: Option<&str>) -> Result<Option<String>, CoreError> {
    Ok(FilterKind::Substring
        .coerce(name, raw)?
        .map(|v| match v {
            FilterValue::Contains(s) => s,
            _ => unreachable!(),
        }))
}

/// Coerce a numeric filter.
pub fn numeric(name: &str, raw: Option<&str>) -> Result<Option<i64>, CoreError> {
    Ok(FilterKind::Numeric
        .coerce(name, raw)?
        .map(|v| match v {
            FilterValue::Int(n) => n,
            _ => unreachable!(),
        }))
}

/// Coerce a boolean-token filter.
pub fn bool_token(name: &str, raw: Option<&str>) -> Result<Option<bool>, CoreError> {
    Ok(FilterKind::BoolToken
        .coerce(name, raw)?
        .map(|v| match v {
            FilterValue::Bool(b) => b,
            _ => unreachable!(),
        }))
}

/// Build an `ILIKE` pattern for a substring filter, escaping the SQL
/// wildcard characters in the needle so user input matches literally.
pub fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_blank_values_mean_no_constraint() {
        for kind in [
            FilterKind::Equality,
            FilterKind::Substring,
            FilterKind::Numeric,
            FilterKind::BoolToken,
        ] {
            assert_eq!(kind.coerce("f", None).unwrap(), None);
            assert_eq!(kind.coerce("f", Some("")).unwrap(), None);
            assert_eq!(kind.coerce("f", Some("   ")).unwrap(), None);
        }
    }

    #[test]
    fn test_equality_and_substring_trim() {
        assert_eq!(
            equality("role", Some(" admin ")).unwrap(),
            Some("admin".to_string())
        );
        assert_eq!(
            substring("client", Some(" Acme ")).unwrap(),
            Some("Acme".to_string())
        );
    }

    #[test]
    fn test_numeric_rejects_non_numbers() {
        assert_eq!(numeric("created_by", Some("17")).unwrap(), Some(17));
        assert_matches!(
            numeric("created_by", Some("seventeen")),
            Err(CoreError::InvalidFilter(_))
        );
        assert_matches!(
            numeric("id", Some("1.5")),
            Err(CoreError::InvalidFilter(_))
        );
    }

    #[test]
    fn test_bool_token_is_strict_but_case_insensitive() {
        assert_eq!(bool_token("is_active", Some("true")).unwrap(), Some(true));
        assert_eq!(bool_token("is_active", Some("FALSE")).unwrap(), Some(false));
        assert_eq!(bool_token("is_active", Some("True")).unwrap(), Some(true));
        assert_matches!(
            bool_token("is_active", Some("yes")),
            Err(CoreError::InvalidFilter(_))
        );
        assert_matches!(
            bool_token("is_active", Some("1")),
            Err(CoreError::InvalidFilter(_))
        );
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("acme"), "%acme%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
    }
}
