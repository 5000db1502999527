use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse a path-style identifier into a [`DbId`].
///
/// Identifiers arrive from the request boundary as raw strings. They
/// must be well-formed positive integers; anything else is rejected
/// with [`CoreError::InvalidIdentifier`] rather than treated as
/// "not found".
pub fn parse_id(name: &str, raw: &str) -> Result<DbId, CoreError> {
    match raw.trim().parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CoreError::InvalidIdentifier(format!(
            "Invalid {name} parameter: '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_id_accepts_positive_integers() {
        assert_eq!(parse_id("task_id", "42").unwrap(), 42);
        assert_eq!(parse_id("task_id", " 7 ").unwrap(), 7);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert_matches!(
            parse_id("proposal_id", "abc"),
            Err(CoreError::InvalidIdentifier(_))
        );
        assert_matches!(
            parse_id("proposal_id", "12.5"),
            Err(CoreError::InvalidIdentifier(_))
        );
        assert_matches!(
            parse_id("proposal_id", ""),
            Err(CoreError::InvalidIdentifier(_))
        );
    }

    #[test]
    fn test_parse_id_rejects_non_positive() {
        assert_matches!(
            parse_id("task_id", "0"),
            Err(CoreError::InvalidIdentifier(_))
        );
        assert_matches!(
            parse_id("task_id", "-3"),
            Err(CoreError::InvalidIdentifier(_))
        );
    }
}
