//! Repository error taxonomy.

use sea_orm::DbErr;
use thiserror::Error;

/// Failure kinds every backend reports.
///
/// Backends classify low-level errors into these and never swallow them.
#[derive(Error, Debug)]
pub enum RepoError {
    /// Lookup matched no stored record
    #[error("record not found")]
    NotFound,

    /// A user with this email already exists
    #[error("email already in use")]
    DuplicateEmail,

    /// Any other backend failure
    #[error("storage failure: {0}")]
    Storage(#[from] DbErr),
}

/// Result type alias for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Log a storage failure with its operation and wrap it.
pub(crate) fn storage_failure(
    component: &'static str,
    op: &'static str,
) -> impl FnOnce(DbErr) -> RepoError {
    move |err| {
        tracing::error!(component, op, error = %err, "storage operation failed");
        RepoError::Storage(err)
    }
}
