//! Store error type and business-rule classification.

/// SQLSTATE the procedure store raises for user-facing rule violations.
pub const BUSINESS_RULE_SQLSTATE: &str = "51000";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A rule enforced by the procedure store was violated. The message is
    /// safe to show to end users.
    #[error("{0}")]
    BusinessRule(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn rule(msg: impl Into<String>) -> Self {
        StoreError::BusinessRule(msg.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(BUSINESS_RULE_SQLSTATE) {
                return StoreError::BusinessRule(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn non_database_errors_stay_internal() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert_matches!(err, StoreError::Database(sqlx::Error::RowNotFound));
    }

    #[test]
    fn rule_message_is_displayed_verbatim() {
        let err = StoreError::rule("Category name already exists");
        assert_eq!(err.to_string(), "Category name already exists");
    }
}
