//! Centralized error handling.
//!
//! Provides a unified error type for the HTTP boundary, with automatic
//! response conversion. Repository failures are mapped in via
//! [`AppError::from_repo`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::ConfigError;
use crate::infra::RepoError;

/// Message returned for every server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Lookup matched nothing; holds the entity name ("asset", "user")
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable message
    #[schema(example = "asset not found")]
    pub error: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Map a repository failure onto a response class.
    ///
    /// `entity` names the record kind in the not-found message.
    pub fn from_repo(entity: &'static str, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound(entity),
            RepoError::DuplicateEmail => AppError::Conflict(err.to_string()),
            RepoError::Storage(e) => AppError::Database(e),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Database(e) => tracing::error!(error = ?e, "request failed: database error"),
            AppError::Config(e) => {
                tracing::error!(error = %e, "request failed: configuration error")
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed: internal error")
            }
            other => tracing::warn!(status = status.as_u16(), error = %other, "request rejected"),
        }

        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_errors_map_to_status_classes() {
        let not_found = AppError::from_repo("asset", RepoError::NotFound);
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.user_message(), "asset not found");

        let duplicate = AppError::from_repo("user", RepoError::DuplicateEmail);
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);
        assert_eq!(duplicate.user_message(), "email already in use");

        let storage = AppError::from_repo(
            "asset",
            RepoError::Storage(sea_orm::DbErr::Custom("connection reset".into())),
        );
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(storage.user_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::internal("pool exhausted on db-3");
        assert!(!err.user_message().contains("db-3"));
    }

    #[tokio::test]
    async fn test_error_body_is_single_field() {
        let response = AppError::NotFound("user").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "user not found" }));
    }
}
