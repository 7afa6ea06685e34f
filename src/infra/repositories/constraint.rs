//! Structured classification of unique-constraint violations.
//!
//! Built from `DbErr::sql_err()` and the driver's reported constraint name
//! so repositories never inspect raw error text themselves.

use sea_orm::{DbErr, RuntimeErr, SqlErr};

/// A unique-constraint violation reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueViolation {
    /// Constraint or index name, when the driver reports one (Postgres does)
    pub constraint: Option<String>,
    /// Driver message
    pub detail: String,
}

impl UniqueViolation {
    /// Extract a unique violation from a database error, if it is one.
    pub fn from_db_err(err: &DbErr) -> Option<Self> {
        match err.sql_err()? {
            SqlErr::UniqueConstraintViolation(detail) => Some(Self {
                constraint: constraint_name(err),
                detail,
            }),
            _ => None,
        }
    }

    /// Whether the violation concerns `table.column` guarded by `constraint`.
    ///
    /// Drivers that name the constraint are matched on the name; SQLite only
    /// reports the offending `table.column` pair.
    pub fn concerns(&self, constraint: &str, table: &str, column: &str) -> bool {
        match &self.constraint {
            Some(name) => name == constraint,
            None => self.detail.contains(&format!("{}.{}", table, column)),
        }
    }
}

fn constraint_name(err: &DbErr) -> Option<String> {
    let runtime = match err {
        DbErr::Exec(e) | DbErr::Query(e) | DbErr::Conn(e) => e,
        _ => return None,
    };

    match runtime {
        RuntimeErr::SqlxError(e) => e
            .as_database_error()
            .and_then(|db| db.constraint())
            .map(str::to_owned),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_constraint_wins() {
        let violation = UniqueViolation {
            constraint: Some("users_email_key".to_string()),
            detail: "duplicate key value violates unique constraint".to_string(),
        };
        assert!(violation.concerns("users_email_key", "users", "email"));
        assert!(!violation.concerns("users_pkey", "users", "id"));
    }

    #[test]
    fn test_unnamed_constraint_matches_column() {
        let violation = UniqueViolation {
            constraint: None,
            detail: "UNIQUE constraint failed: users.email".to_string(),
        };
        assert!(violation.concerns("users_email_key", "users", "email"));
        assert!(!violation.concerns("assets_symbol_key", "assets", "symbol"));
    }

    #[test]
    fn test_non_sql_errors_are_not_violations() {
        assert!(UniqueViolation::from_db_err(&DbErr::Custom("boom".into())).is_none());
        assert!(UniqueViolation::from_db_err(&DbErr::RecordNotInserted).is_none());
    }
}
