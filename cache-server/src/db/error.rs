//! Database error type

/// Error returned by every repository operation
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },

    /// Constraint violation reported by a non-SQL store
    #[error("{0}")]
    Constraint(String),
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = DbError::NotFound {
            resource: "location",
            id: 42,
        };
        assert_eq!(err.to_string(), "not found: location '42'");
        assert!(err.is_not_found());
    }

    #[test]
    fn constraint_message_is_verbatim() {
        let err = DbError::Constraint("violates foreign key constraint".into());
        assert_eq!(err.to_string(), "violates foreign key constraint");
        assert!(!err.is_not_found());
    }
}
